//! Credential encryption for both login tiers.
//!
//! The gateway expects an AES-CBC sealed password keyed by the salt embedded
//! in its login form. The application expects `password;nonce` sealed with
//! RSA PKCS#1 v1.5 under a one-time public key.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use crate::error::PortalError;

/// Length of the random prefix placed before the gateway password.
pub const GATEWAY_PREFIX_LEN: usize = 64;

/// Length of the random initialization vector.
pub const GATEWAY_IV_LEN: usize = 16;

/// Seal the gateway password with the form salt.
pub fn encrypt_gateway_password(salt: &str, password: &str) -> Result<String, PortalError> {
    let prefix = random_alphanumeric(GATEWAY_PREFIX_LEN);
    let iv = random_alphanumeric(GATEWAY_IV_LEN);
    seal_gateway_password(salt, &iv, &prefix, password)
}

/// Deterministic core of [`encrypt_gateway_password`].
pub fn seal_gateway_password(
    salt: &str,
    iv: &str,
    prefix: &str,
    password: &str,
) -> Result<String, PortalError> {
    let plaintext = format!("{prefix}{password}");
    let sealed = aes_cbc_encrypt(salt.as_bytes(), iv.as_bytes(), plaintext.as_bytes())?;
    Ok(STANDARD.encode(sealed))
}

/// Seal `password;nonce` under the application's public key.
pub fn encrypt_application_password(
    public_key: &str,
    password: &str,
    nonce: &str,
) -> Result<String, PortalError> {
    let key = decode_public_key(public_key)?;
    let message = format!("{password};{nonce}");

    let sealed = key
        .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, message.as_bytes())
        .map_err(|e| PortalError::Crypto(format!("RSA encryption failed: {e}")))?;

    Ok(STANDARD.encode(sealed))
}

/// Parse a Base64 DER public key, SubjectPublicKeyInfo first, bare PKCS#1 second.
pub fn decode_public_key(encoded: &str) -> Result<RsaPublicKey, PortalError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let der = STANDARD
        .decode(compact)
        .map_err(|e| PortalError::Crypto(format!("public key is not Base64: {e}")))?;

    RsaPublicKey::from_public_key_der(&der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
        .map_err(|e| PortalError::Crypto(format!("public key is not an RSA key: {e}")))
}

fn aes_cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PortalError> {
    let invalid =
        |e: aes::cipher::InvalidLength| PortalError::Crypto(format!("invalid AES key or IV: {e}"));

    match key.len() {
        16 => Ok(cbc::Encryptor::<aes::Aes128>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<aes::Aes192>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<aes::Aes256>::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        other => Err(PortalError::Crypto(format!(
            "salt must be 16, 24 or 32 bytes, got {other}"
        ))),
    }
}

fn random_alphanumeric(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::BlockDecryptMut;
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::EncodePublicKey;

    const SALT: &str = "ybb3MxGnaVEBf5Fk";

    fn open(sealed: &str, iv: &[u8]) -> Vec<u8> {
        let bytes = STANDARD.decode(sealed).unwrap();
        cbc::Decryptor::<aes::Aes128>::new_from_slices(SALT.as_bytes(), iv)
            .unwrap()
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .unwrap()
    }

    #[test]
    fn test_sealed_gateway_password_opens_with_salt() {
        let prefix = "p".repeat(GATEWAY_PREFIX_LEN);
        let sealed = seal_gateway_password(SALT, "0123456789abcdef", &prefix, "s3cret").unwrap();

        let plain = open(&sealed, b"0123456789abcdef");
        assert_eq!(plain, format!("{prefix}s3cret").into_bytes());
    }

    #[test]
    fn test_random_iv_only_garbles_the_prefix() {
        let sealed = encrypt_gateway_password(SALT, "s3cret").unwrap();

        // Decrypting with the wrong IV corrupts only the first block.
        let plain = open(&sealed, &[0u8; GATEWAY_IV_LEN]);
        assert_eq!(plain.len(), GATEWAY_PREFIX_LEN + "s3cret".len());
        assert!(plain.ends_with(b"s3cret"));
    }

    #[test]
    fn test_gateway_password_rejects_bad_salt_length() {
        let err = encrypt_gateway_password("short", "s3cret").unwrap_err();
        assert!(matches!(err, PortalError::Crypto(_)));
    }

    #[test]
    fn test_random_material_is_alphanumeric() {
        let value = random_alphanumeric(GATEWAY_PREFIX_LEN);
        assert_eq!(value.len(), GATEWAY_PREFIX_LEN);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_application_password_decrypts_with_private_key() {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let der = private.to_public_key().to_public_key_der().unwrap();
        let encoded = STANDARD.encode(der.as_bytes());

        let sealed = encrypt_application_password(&encoded, "hunter2", "n0nce").unwrap();
        let plain = private
            .decrypt(Pkcs1v15Encrypt, &STANDARD.decode(sealed).unwrap())
            .unwrap();

        assert_eq!(plain, b"hunter2;n0nce");
    }

    #[test]
    fn test_garbage_public_key_is_a_crypto_error() {
        let err = encrypt_application_password("bm90IGEga2V5", "pw", "nonce").unwrap_err();
        assert!(matches!(err, PortalError::Crypto(_)));
    }
}
