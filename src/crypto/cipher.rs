use aes::Aes256;
use anyhow::Result;
use cbc::Decryptor;
use cbc::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use zeroize::Zeroizing;

use super::{BLOCK_LEN, IV_LEN, KEY_LEN};
use crate::error::DecryptError;

type Aes256CbcDec = Decryptor<Aes256>;

/// Decrypt AES-256-CBC ciphertext and strip its PKCS#7 padding.
///
/// Nothing authenticates the ciphertext, so a wrong key shows up as a padding
/// failure most of the time and as garbage plaintext otherwise.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if iv.len() != IV_LEN {
        return Err(DecryptError::InvalidIvLength(iv.len()).into());
    }
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(DecryptError::Misaligned(ciphertext.len()).into());
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| DecryptError::InvalidIvLength(iv.len()))?;

    log::debug!("decrypting {} byte ciphertext", ciphertext.len());

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| DecryptError::InvalidPadding)?;

    Ok(Zeroizing::new(plaintext.to_vec()))
}

#[cfg(test)]
pub(crate) fn encrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    use cbc::Encryptor;
    use cbc::cipher::BlockEncryptMut;

    let mut buf = vec![0u8; (plaintext.len() / BLOCK_LEN + 1) * BLOCK_LEN];
    buf[..plaintext.len()].copy_from_slice(plaintext);

    Encryptor::<Aes256>::new_from_slices(key, iv)
        .unwrap()
        .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
        .unwrap()
        .to_vec()
}
