use std::fmt;

#[derive(Debug)]
pub enum DecryptError {
    InvalidBase64 {
        field: &'static str,
        source: base64::DecodeError,
    },
    InvalidIvLength(usize),
    Misaligned(usize),
    InvalidPadding,
    InvalidUtf8,
}

impl fmt::Display for DecryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecryptError::InvalidBase64 { field, .. } => write!(f, "{field} is not valid base64"),
            DecryptError::InvalidIvLength(len) => {
                write!(f, "iv must be 16 bytes, got {len}")
            }
            DecryptError::Misaligned(len) => write!(
                f,
                "ciphertext length {len} is not a non-zero multiple of the 16 byte block size"
            ),
            DecryptError::InvalidPadding => {
                write!(f, "Invalid password, salt or iv, or corrupted ciphertext")
            }
            DecryptError::InvalidUtf8 => write!(
                f,
                "decrypted data is not valid UTF-8; possibly wrong password or corrupted data"
            ),
        }
    }
}

impl std::error::Error for DecryptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecryptError::InvalidBase64 { source, .. } => Some(source),
            _ => None,
        }
    }
}
