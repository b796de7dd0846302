use anyhow::{Context, Result};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha512;
use zeroize::Zeroizing;

use super::{KEY_LEN, PBKDF2_ITERATIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    pub fn new(iterations: u32) -> Result<Self> {
        let params = Self { iterations };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            anyhow::bail!("pbkdf2 iterations must be >= 1");
        }
        Ok(())
    }
}

/// Derive the AES-256 key from a password with PBKDF2-HMAC-SHA512.
///
/// Blocks for the full iteration count; at the default 10 million rounds that
/// is several seconds on current hardware.
pub fn derive_key(
    password: &str,
    salt: &[u8],
    kdf: KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    kdf.validate().context("invalid PBKDF2 parameters")?;

    log::debug!(
        "deriving key: PBKDF2-HMAC-SHA512, {} iterations, {} byte salt",
        kdf.iterations,
        salt.len()
    );

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::<Hmac<Sha512>>(password.as_bytes(), salt, kdf.iterations, &mut key[..])
        .map_err(|e| anyhow::anyhow!("pbkdf2 key derivation failed {e}"))?;

    Ok(key)
}
