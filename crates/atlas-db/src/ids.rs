//! # Identifier Generation
//!
//! ID helpers for the domain services. Products, users, and log entries use
//! UUID v4; receipts use a human-readable date-prefixed format.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// Characters used in receipt suffixes and salts.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a new entity id (products, users, log entries).
pub fn entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a receipt number: `TRX-YYMMDD-XXXXXX`.
///
/// The date prefix keeps receipts roughly chronologically sortable and easy
/// to read back to a customer; the random suffix makes collisions within a
/// day vanishingly unlikely for a single-till shop.
///
/// ## Example
/// `TRX-260807-K3F9QZ`
pub fn receipt_id() -> String {
    let date_part = Utc::now().format("%y%m%d");
    format!("TRX-{}-{}", date_part, random_suffix(6))
}

/// Generates a random salt for admin credential hashing.
pub fn credential_salt() -> String {
    random_suffix(16)
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
