//! One-time login codes.
//!
//! A code is six decimal digits, mailed in plaintext and stored only as its
//! SHA-256 digest so the `otps` table never holds a usable secret.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Number of digits in a login code.
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a login code in minutes.
pub const DEFAULT_OTP_EXPIRY_MINS: i64 = 10;

/// A freshly generated code and the digest to persist.
pub struct GeneratedCode {
    /// Sent to the user by email, never stored.
    pub plaintext: String,
    /// SHA-256 hex digest of `plaintext`.
    pub hash: String,
}

/// Generate a random zero-padded six digit code.
pub fn generate_code() -> GeneratedCode {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    let plaintext = format!("{n:0width$}", width = CODE_LENGTH);
    let hash = hash_code(&plaintext);
    GeneratedCode { plaintext, hash }
}

/// SHA-256 hex digest of a login code.
pub fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

/// Whether `code` has the shape of a login code (exactly six ASCII digits).
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
