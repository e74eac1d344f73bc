// src/infrastructure/crypto.rs
//! Symmetric encryption of stored values with Fernet tokens.
use fernet::Fernet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption key must be 32 url-safe base64 encoded bytes")]
    InvalidKey,
    #[error("token is invalid or was not made with this key")]
    InvalidToken,
    #[error("decrypted value is not UTF-8")]
    NotUtf8,
}

/// Encrypts and decrypts strings with one key. Tokens are url-safe base64
/// and carry their creation time.
#[derive(Clone)]
pub struct FieldCipher {
    fernet: Arc<Fernet>,
}

impl FieldCipher {
    pub fn new(key: &str) -> Result<Self, CryptoError> {
        let fernet = Fernet::new(key.trim()).ok_or(CryptoError::InvalidKey)?;
        Ok(Self {
            fernet: Arc::new(fernet),
        })
    }

    /// A fresh random key in the format `new` accepts.
    pub fn generate_key() -> String {
        Fernet::generate_key()
    }

    pub fn encrypt(&self, plaintext: &str) -> String {
        self.fernet.encrypt(plaintext.as_bytes())
    }

    pub fn decrypt(&self, token: &str) -> Result<String, CryptoError> {
        let bytes = self
            .fernet
            .decrypt(token)
            .map_err(|_| CryptoError::InvalidToken)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::NotUtf8)
    }
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}
