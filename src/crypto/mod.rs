//! Cryptographic primitives for message decryption.
//!
//! Provides PBKDF2 key derivation and AES-256-CBC decryption.

pub mod cipher;
pub mod kdf;

pub use kdf::{KdfParams, derive_key};

/// Length of the derived key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the CBC initialization vector (16 bytes).
pub const IV_LEN: usize = 16;
/// AES block size (16 bytes).
pub const BLOCK_LEN: usize = 16;
/// PBKDF2 rounds shared with the encrypting side. Changing this breaks every
/// existing message.
pub const PBKDF2_ITERATIONS: u32 = 10_000_000;
