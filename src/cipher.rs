//! Reversible content obfuscation.
//!
//! A positional additive stream cipher with no diffusion: every byte is
//! shifted by the same key, derived by summing the bytes of the secret.
//! This protects note content from casual inspection of the database file
//! and nothing more. It is obfuscation, not cryptography.

use crate::error::JotError;

/// Environment variable supplying the secret key material.
pub const KEY_ENV_VAR: &str = "JOT_KEY";

/// Derives the byte-shift key from secret key material.
///
/// The key is the wrapping sum of the secret's bytes, so any non-empty
/// secret yields a stable key and equal secrets always agree.
pub fn derive_key(key_material: &str) -> u8 {
    key_material
        .bytes()
        .fold(0u8, |acc, b| acc.wrapping_add(b))
}

/// Obfuscates content by adding the derived key to every byte (mod 256).
pub fn encrypt(key_material: &str, content: &[u8]) -> Vec<u8> {
    let key = derive_key(key_material);
    content.iter().map(|b| b.wrapping_add(key)).collect()
}

/// Reverses [`encrypt`] by subtracting the derived key from every byte.
pub fn decrypt(key_material: &str, content: &[u8]) -> Vec<u8> {
    let key = derive_key(key_material);
    content.iter().map(|b| b.wrapping_sub(key)).collect()
}

/// Reads secret key material from the environment.
///
/// Absence is a recoverable condition surfaced as `MissingKeyMaterial`;
/// callers must check this before any partial persistence happens.
pub fn key_from_env() -> Result<String, JotError> {
    std::env::var(KEY_ENV_VAR).map_err(|_| JotError::MissingKeyMaterial)
}
