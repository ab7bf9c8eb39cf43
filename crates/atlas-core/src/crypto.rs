//! # Crypto Primitives
//!
//! SHA-256 digest helpers for staff credentials and the emergency-access
//! code. Pure functions; key generation and persistence live in atlas-db.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of `input` and return it as a lowercase hex
/// string.
///
/// Used directly for the emergency-code check and as the primitive under
/// [`password_hash`].
///
/// # Example
/// ```
/// use atlas_core::crypto::sha256_hex;
///
/// let hash = sha256_hex("secret");
/// assert_eq!(hash.len(), 64); // SHA-256 = 32 bytes = 64 hex chars
/// ```
#[inline]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the salted credential digest for an admin account:
///
/// ```text
/// SHA256( lowercase(trim(email)) ++ "::" ++ password ++ "::" ++ salt )
/// ```
///
/// The email is folded to lowercase so the digest is insensitive to how the
/// address was typed at login.
#[inline]
pub fn password_hash(email: &str, password: &str, salt: &str) -> String {
    let raw = format!("{}::{}::{}", email.trim().to_lowercase(), password, salt);
    sha256_hex(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vectors() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_password_hash_is_email_case_insensitive() {
        let a = password_hash("Owner@Shop.Example", "hunter2", "s4lt");
        let b = password_hash("owner@shop.example", "hunter2", "s4lt");
        assert_eq!(a, b);
    }

    #[test]
    fn test_password_hash_varies_with_salt_and_password() {
        let base = password_hash("owner@shop.example", "hunter2", "s4lt");
        assert_ne!(base, password_hash("owner@shop.example", "hunter2", "other"));
        assert_ne!(base, password_hash("owner@shop.example", "hunter3", "s4lt"));
    }

    #[test]
    fn test_consistency() {
        let h1 = password_hash("owner@shop.example", "pw", "s");
        let h2 = password_hash("owner@shop.example", "pw", "s");
        assert_eq!(h1, h2);
    }
}
