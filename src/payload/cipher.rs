use base64::Engine;
use base64::engine::{GeneralPurpose, general_purpose};
use openssl::symm::{self, Cipher};

use crate::core::{FapiaoError, Result};

/// Standard-alphabet, padded base64 used for ciphertext framing.
pub(crate) const BASE64_ENGINE: GeneralPurpose = general_purpose::STANDARD;

/// AES-128 key and IV size in bytes.
pub const KEY_LENGTH: usize = 16;

/// AES-128-CBC with PKCS7 padding under a fixed, vendor-issued key and IV.
///
/// The IV is deliberately constant: the vendor decrypts with the same
/// `HashIV`, so identical plaintexts always produce identical ciphertexts.
///
/// ```
/// use fapiao::payload::CipherService;
///
/// let cipher = CipherService::new("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk").unwrap();
/// let sealed = cipher.encrypt(b"hello").unwrap();
/// assert_eq!(cipher.decrypt(&sealed).unwrap(), b"hello");
/// ```
#[derive(Clone)]
pub struct CipherService {
    hash_key: Vec<u8>,
    hash_iv: Vec<u8>,
}

impl CipherService {
    /// Fails with [`FapiaoError::Configuration`] if the key or IV is empty or not 16 bytes.
    pub fn new(hash_key: impl AsRef<[u8]>, hash_iv: impl AsRef<[u8]>) -> Result<Self> {
        let hash_key = hash_key.as_ref();
        let hash_iv = hash_iv.as_ref();

        if hash_key.is_empty() {
            return Err(FapiaoError::Configuration("HashKey is empty".into()));
        }
        if hash_iv.is_empty() {
            return Err(FapiaoError::Configuration("HashIV is empty".into()));
        }
        if hash_key.len() != KEY_LENGTH {
            return Err(FapiaoError::Configuration(format!(
                "HashKey must be {KEY_LENGTH} bytes, got {}",
                hash_key.len()
            )));
        }
        if hash_iv.len() != KEY_LENGTH {
            return Err(FapiaoError::Configuration(format!(
                "HashIV must be {KEY_LENGTH} bytes, got {}",
                hash_iv.len()
            )));
        }

        Ok(Self {
            hash_key: hash_key.to_vec(),
            hash_iv: hash_iv.to_vec(),
        })
    }

    /// Encrypt and base64-encode.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let sealed = symm::encrypt(
            Cipher::aes_128_cbc(),
            &self.hash_key,
            Some(&self.hash_iv),
            plaintext,
        )
        .map_err(|e| FapiaoError::Encryption(format!("encryption failed: {e}")))?;

        Ok(BASE64_ENGINE.encode(sealed))
    }

    /// Base64-decode and decrypt.
    ///
    /// Empty input, invalid base64, and ciphertext that does not decrypt
    /// under this key/IV (including bad padding) are all errors.
    pub fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>> {
        if ciphertext.is_empty() {
            return Err(FapiaoError::Encryption(
                "decryption failed: input is empty".into(),
            ));
        }

        let sealed = BASE64_ENGINE
            .decode(ciphertext)
            .map_err(|e| FapiaoError::Encryption(format!("decryption failed: {e}")))?;

        symm::decrypt(
            Cipher::aes_128_cbc(),
            &self.hash_key,
            Some(&self.hash_iv),
            &sealed,
        )
        .map_err(|e| FapiaoError::Encryption(format!("decryption failed: {e}")))
    }
}

impl std::fmt::Debug for CipherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherService")
            .field("hash_key", &"***")
            .field("hash_iv", &"***")
            .finish()
    }
}
