//! Scanned QR payloads.
//!
//! The QR code holds a shell one-liner that decrypts with PHP:
//! ```text
//! php -r "echo openssl_decrypt(base64_decode('<CIPHERTEXT>'),'AES-256-CBC',hash_pbkdf2('sha512',...,base64_decode('<SALT>'),1e7,32,true),OPENSSL_RAW_DATA,base64_decode('<IV>')).\"\\n\";"
//! ```
//! Only the quoted `base64_decode` arguments are used.

use anyhow::{Result, bail};

const DECODE_CALL: &str = "base64_decode(";
const DECRYPT_CALL: &str = "openssl_decrypt(";
const CIPHER_NAME: &str = "AES-256-CBC";

/// Returns the quoted argument of every `base64_decode(...)` call, in order.
///
/// Calls whose argument is not a quoted literal are skipped.
pub fn base64_arguments(text: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(DECODE_CALL) {
        rest = &rest[start + DECODE_CALL.len()..];

        let quote = match rest.chars().next() {
            Some(q @ ('\'' | '"')) => q,
            _ => continue,
        };
        let body = &rest[1..];

        match body.find(quote) {
            Some(end) => {
                args.push(&body[..end]);
                rest = &body[end + 1..];
            }
            None => break,
        }
    }

    args
}

/// Splits a payload into its ciphertext, salt and iv fields.
///
/// # Errors
///
/// Returns an error if the payload does not contain exactly three quoted
/// `base64_decode` arguments, or if its `openssl_decrypt` call names a
/// cipher other than AES-256-CBC.
pub fn parse(text: &str) -> Result<[&str; 3]> {
    if text.contains(DECRYPT_CALL) && !text.contains(CIPHER_NAME) {
        bail!("payload does not use {CIPHER_NAME}");
    }

    match base64_arguments(text)[..] {
        [ciphertext, salt, iv] => Ok([ciphertext, salt, iv]),
        ref other => bail!(
            "expected 3 base64_decode arguments in payload (ciphertext, salt, iv), found {}",
            other.len()
        ),
    }
}
