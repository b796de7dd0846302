mod crypto;
mod error;
mod format;

pub use crate::crypto::{IV_LEN, KEY_LEN, KdfParams, PBKDF2_ITERATIONS, derive_key};
pub use crate::error::DecryptError;
pub use crate::format::{SealedMessage, payload};
use anyhow::Result;
use zeroize::Zeroizing;

/// Decrypts a message with the fixed 10 million round PBKDF2 parameters.
///
/// Runs key derivation, AES-256-CBC decryption and PKCS#7 unpadding, in that
/// order. Every failure aborts; a wrong password, salt or iv most often
/// surfaces as [`DecryptError::InvalidPadding`].
pub fn decrypt(
    password: &str,
    salt: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    decrypt_with_kdf(password, salt, iv, ciphertext, KdfParams::default())
}

pub fn decrypt_with_kdf(
    password: &str,
    salt: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    kdf: KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    let key = crypto::derive_key(password, salt, kdf)?;
    crypto::cipher::decrypt(&key, iv, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher::encrypt;

    fn fast_kdf() -> KdfParams {
        KdfParams::new(1_000).unwrap()
    }

    fn seal(
        password: &str,
        salt: &[u8],
        iv: &[u8; IV_LEN],
        plaintext: &[u8],
        kdf: KdfParams,
    ) -> Vec<u8> {
        let key = derive_key(password, salt, kdf).unwrap();
        encrypt(&key, iv, plaintext)
    }

    fn assert_not_recovered(result: Result<Zeroizing<Vec<u8>>>, plaintext: &[u8]) {
        match result {
            Ok(p) => assert_ne!(&p[..], plaintext),
            Err(e) => assert!(
                e.downcast_ref::<DecryptError>().is_some(),
                "unexpected error: {e:?}"
            ),
        }
    }

    #[test]
    fn correct_horse_decrypts_hello_world() {
        let salt = [0u8; 16];
        let iv = [0u8; 16];
        let ciphertext = seal(
            "correct horse",
            &salt,
            &iv,
            b"hello world",
            KdfParams::default(),
        );

        let plaintext = decrypt("correct horse", &salt, &iv, &ciphertext).unwrap();
        assert_eq!(&plaintext[..], b"hello world");

        match decrypt("wrong password", &salt, &iv, &ciphertext) {
            Err(e) => assert!(matches!(
                e.downcast_ref::<DecryptError>(),
                Some(DecryptError::InvalidPadding)
            )),
            Ok(p) => assert_ne!(&p[..], b"hello world"),
        }
    }

    #[test]
    fn roundtrip_with_random_looking_inputs() {
        let salt = b"0123456789abcdef0123";
        let iv = *b"fedcba9876543210";
        let message = "line one\nline two: \u{1F512}".repeat(5);
        let ciphertext = seal("pw", salt, &iv, message.as_bytes(), fast_kdf());

        let plaintext = decrypt_with_kdf("pw", salt, &iv, &ciphertext, fast_kdf()).unwrap();
        assert_eq!(&plaintext[..], message.as_bytes());
    }

    #[test]
    fn decrypt_is_deterministic() {
        let salt = [1u8; 8];
        let iv = [2u8; 16];
        let ciphertext = seal("pw", &salt, &iv, b"same every time", fast_kdf());

        let a = decrypt_with_kdf("pw", &salt, &iv, &ciphertext, fast_kdf()).unwrap();
        let b = decrypt_with_kdf("pw", &salt, &iv, &ciphertext, fast_kdf()).unwrap();
        assert_eq!(a, b);

        let e1 = decrypt_with_kdf("nope", &salt, &iv, &ciphertext, fast_kdf()).map(|p| p.to_vec());
        let e2 = decrypt_with_kdf("nope", &salt, &iv, &ciphertext, fast_kdf()).map(|p| p.to_vec());
        match (e1, e2) {
            (Ok(x), Ok(y)) => assert_eq!(x, y),
            (Err(x), Err(y)) => assert_eq!(x.to_string(), y.to_string()),
            _ => panic!("outcomes differ between identical runs"),
        }
    }

    #[test]
    fn single_byte_changes_never_recover_plaintext() {
        let password = "hunter2";
        let salt = [7u8; 16];
        let iv = [8u8; 16];
        let plaintext = b"attack at dawn";
        let ciphertext = seal(password, &salt, &iv, plaintext, fast_kdf());

        assert_not_recovered(
            decrypt_with_kdf("hunter3", &salt, &iv, &ciphertext, fast_kdf()),
            plaintext,
        );

        for i in 0..salt.len() {
            let mut bad_salt = salt;
            bad_salt[i] ^= 0x01;
            assert_not_recovered(
                decrypt_with_kdf(password, &bad_salt, &iv, &ciphertext, fast_kdf()),
                plaintext,
            );
        }

        for i in 0..iv.len() {
            let mut bad_iv = iv;
            bad_iv[i] ^= 0x01;
            assert_not_recovered(
                decrypt_with_kdf(password, &salt, &bad_iv, &ciphertext, fast_kdf()),
                plaintext,
            );
        }
    }

    #[test]
    fn misaligned_ciphertext_fails_in_cipher_stage() {
        let salt = [1u8; 16];
        let iv = [2u8; 16];
        let mut ciphertext = seal("pw", &salt, &iv, b"hello world", fast_kdf());
        ciphertext.push(0);

        let err = decrypt_with_kdf("pw", &salt, &iv, &ciphertext, fast_kdf()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DecryptError>(),
            Some(DecryptError::Misaligned(17))
        ));
    }

    #[test]
    fn sealed_message_roundtrip_through_payload() {
        use base64::{Engine, engine::general_purpose::STANDARD};

        let salt = [3u8; 16];
        let iv = [4u8; 16];
        let ciphertext = seal("pw", &salt, &iv, b"from a qr code", fast_kdf());

        let text = format!(
            "php -r \"echo openssl_decrypt(base64_decode('{}'),'AES-256-CBC',hash_pbkdf2('sha512',exec(\\\"python -c 'import getpass;print getpass.getpass()'\\\"),base64_decode('{}'),1e7,32,true),OPENSSL_RAW_DATA,base64_decode('{}')).\\\"\\\\n\\\";\"",
            STANDARD.encode(&ciphertext),
            STANDARD.encode(salt),
            STANDARD.encode(iv),
        );

        let msg = SealedMessage::from_payload(&text).unwrap();
        assert_eq!(msg.salt(), &salt);
        assert_eq!(msg.iv(), &iv);
        assert_eq!(
            msg.open_with_kdf("pw", fast_kdf()).unwrap().as_str(),
            "from a qr code"
        );
    }
}
