//! # Staff Directory
//!
//! CRUD over the `users` collection plus the offline login paths.
//!
//! ## Credential Schemes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Cashier                         Admin                              │
//! │  ───────                         ─────                              │
//! │  pin: 4 digits                   email (lowercased, unique index)   │
//! │  unique across cashiers          passwordHash = SHA256(             │
//! │                                      lower(email)::password::salt)  │
//! │                                  salt: random, per user             │
//! │                                                                     │
//! │  The plaintext password never reaches the store.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invalid PIN or a wrong password is an expected no-match outcome, not
//! an error; only malformed requests and engine faults produce `Err`.

use chrono::Utc;
use tracing::{debug, info};

use atlas_core::crypto::{password_hash, sha256_hex};
use atlas_core::validation::{validate_email, validate_name, validate_pin};
use atlas_core::{CoreError, NewStaff, Role, Setting, StaffCredentials, User, ValidationError};

use crate::error::ServiceResult;
use crate::ids;
use crate::schema::collections;
use crate::services::settings::keys;
use crate::store::Store;

/// The staff directory.
#[derive(Debug, Clone)]
pub struct StaffService {
    store: Store,
}

impl StaffService {
    pub fn new(store: Store) -> Self {
        StaffService { store }
    }

    /// Returns every staff member.
    pub async fn get_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.store.get_all(collections::USERS).await?)
    }

    /// Creates a staff member after credential-uniqueness and format checks.
    pub async fn add(&self, data: NewStaff) -> ServiceResult<User> {
        validate_name("name", &data.name)?;

        let now = Utc::now();
        let user = match data.credentials {
            StaffCredentials::Admin { email, password } => {
                validate_email(&email)?;
                if password.is_empty() {
                    return Err(ValidationError::Required {
                        field: "password".to_string(),
                    }
                    .into());
                }

                // Emails are stored lowercased; the unique index only ever
                // sees one case form.
                let email = email.trim().to_lowercase();

                let existing: Option<User> = self
                    .store
                    .get_by_index(collections::USERS, "email", &email)
                    .await?;
                if existing.is_some() {
                    return Err(CoreError::DuplicateCredential {
                        field: "email".to_string(),
                        value: email,
                    }
                    .into());
                }

                let salt = ids::credential_salt();
                let hash = password_hash(&email, &password, &salt);

                User {
                    id: ids::entity_id(),
                    name: data.name,
                    role: Role::Admin,
                    created_at: now,
                    pin: None,
                    email: Some(email),
                    password_hash: Some(hash),
                    salt: Some(salt),
                }
            }

            StaffCredentials::Cashier { pin } => {
                validate_pin(&pin)?;

                let all = self.get_all().await?;
                if all.iter().any(|u| u.pin.as_deref() == Some(pin.as_str())) {
                    return Err(CoreError::DuplicateCredential {
                        field: "pin".to_string(),
                        value: pin,
                    }
                    .into());
                }

                User {
                    id: ids::entity_id(),
                    name: data.name,
                    role: Role::Cashier,
                    created_at: now,
                    pin: Some(pin),
                    email: None,
                    password_hash: None,
                    salt: None,
                }
            }
        };

        info!(id = %user.id, role = ?user.role, "Adding staff member");
        self.store.insert(collections::USERS, &user).await?;

        Ok(user)
    }

    /// Deletes a staff member by id.
    ///
    /// Refuses with [`CoreError::LastAdminProtected`] when the target is the
    /// only remaining admin; the directory must never be left without one.
    /// Deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let target: Option<User> = self.store.get_by_id(collections::USERS, id).await?;

        let Some(target) = target else {
            return Ok(());
        };

        if target.is_admin() {
            let admins = self
                .get_all()
                .await?
                .iter()
                .filter(|u| u.is_admin())
                .count();
            if admins <= 1 {
                return Err(CoreError::LastAdminProtected.into());
            }
        }

        info!(id = %id, "Deleting staff member");
        Ok(self.store.delete_by_id(collections::USERS, id).await?)
    }

    /// Cashier login: returns the cashier holding this PIN, or `None`.
    ///
    /// A malformed PIN is a no-match, not an error.
    pub async fn login_with_pin(&self, pin: &str) -> ServiceResult<Option<User>> {
        if validate_pin(pin).is_err() {
            return Ok(None);
        }

        let user = self
            .get_all()
            .await?
            .into_iter()
            .find(|u| u.is_cashier() && u.pin.as_deref() == Some(pin));

        debug!(matched = user.is_some(), "PIN login attempt");
        Ok(user)
    }

    /// Admin login: recomputes the salted digest with the stored salt and
    /// compares it against the stored hash.
    pub async fn verify_admin_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> ServiceResult<Option<User>> {
        if email.trim().is_empty() || password.is_empty() {
            return Ok(None);
        }

        let email = email.trim().to_lowercase();
        let admin: Option<User> = self
            .store
            .get_by_index(collections::USERS, "email", &email)
            .await?;

        let Some(admin) = admin else {
            return Ok(None);
        };

        let (Some(salt), Some(stored_hash)) = (admin.salt.as_deref(), admin.password_hash.as_deref())
        else {
            return Ok(None);
        };

        if !admin.is_admin() {
            return Ok(None);
        }

        let candidate = password_hash(&email, password, salt);
        let matched = candidate == stored_hash;

        debug!(matched, "Admin credential check");
        Ok(if matched { Some(admin) } else { None })
    }

    /// Out-of-band recovery: compares the SHA-256 digest of the supplied
    /// code against the stored `admin_code_hash` setting.
    pub async fn verify_emergency_code(&self, code: &str) -> ServiceResult<bool> {
        let stored: Option<Setting> = self
            .store
            .get_by_id(collections::SETTINGS, keys::ADMIN_CODE_HASH)
            .await?;

        let Some(stored) = stored else {
            return Ok(false);
        };
        let Some(stored_hash) = stored.value.as_str() else {
            return Ok(false);
        };

        Ok(sha256_hex(code.trim()) == stored_hash)
    }

    /// Installs the emergency-access code hash if none exists yet.
    ///
    /// Returns `true` when the code was seeded, `false` when a hash was
    /// already present (the existing code wins).
    pub async fn seed_emergency_code(&self, code: &str) -> ServiceResult<bool> {
        let existing: Option<Setting> = self
            .store
            .get_by_id(collections::SETTINGS, keys::ADMIN_CODE_HASH)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let setting = Setting {
            key: keys::ADMIN_CODE_HASH.to_string(),
            value: sha256_hex(code.trim()).into(),
        };
        self.store.upsert(collections::SETTINGS, &setting).await?;

        info!("Emergency access code seeded");
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
