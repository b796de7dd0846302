//! Input format handling for sealed messages.
//!
//! A message travels as three base64 fields (ciphertext, salt, iv), either on
//! their own or embedded in the decryption command printed into a QR code.

use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::KdfParams;
use crate::error::DecryptError;

pub mod payload;

/// Field names, in the order they appear in a payload.
pub const FIELDS: [&str; 3] = ["ciphertext", "salt", "iv"];

/// A decoded message, ready to be opened with a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    ciphertext: Vec<u8>,
    salt: Vec<u8>,
    iv: Vec<u8>,
}

impl SealedMessage {
    /// Creates a SealedMessage from raw bytes.
    pub fn new(ciphertext: Vec<u8>, salt: Vec<u8>, iv: Vec<u8>) -> Self {
        Self {
            ciphertext,
            salt,
            iv,
        }
    }

    /// Decodes the three base64 fields.
    ///
    /// ASCII whitespace inside a field is ignored so that values wrapped by a
    /// terminal or QR reader still decode.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::InvalidBase64`] naming the first bad field.
    pub fn from_base64(ciphertext: &str, salt: &str, iv: &str) -> Result<Self> {
        Ok(Self {
            ciphertext: decode_field(FIELDS[0], ciphertext)?,
            salt: decode_field(FIELDS[1], salt)?,
            iv: decode_field(FIELDS[2], iv)?,
        })
    }

    /// Extracts and decodes the fields from a scanned decryption command.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not carry exactly three
    /// `base64_decode` arguments, names a foreign cipher, or a field is not
    /// valid base64.
    pub fn from_payload(text: &str) -> Result<Self> {
        let [ciphertext, salt, iv] = payload::parse(text)?;
        Self::from_base64(ciphertext, salt, iv)
    }

    /// Returns the ciphertext bytes.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Returns the salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the iv bytes.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Decrypts the message and decodes it as UTF-8 text.
    pub fn open(&self, password: &str) -> Result<Zeroizing<String>> {
        self.open_with_kdf(password, KdfParams::default())
    }

    pub fn open_with_kdf(&self, password: &str, kdf: KdfParams) -> Result<Zeroizing<String>> {
        let plaintext =
            crate::decrypt_with_kdf(password, &self.salt, &self.iv, &self.ciphertext, kdf)?;

        let text = std::str::from_utf8(&plaintext).map_err(|_| DecryptError::InvalidUtf8)?;
        Ok(Zeroizing::new(text.to_owned()))
    }
}

fn decode_field(field: &'static str, text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|source| DecryptError::InvalidBase64 { field, source }.into())
}
