//! ChaCha20-Poly1305 sealing with the nonce embedded in the blob.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CipherError, Result};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;
/// Nonce length in bytes, stored at the front of every blob.
pub const NONCE_LEN: usize = 12;
/// Poly1305 tag length in bytes, stored at the end of every blob.
pub const TAG_LEN: usize = 16;

/// Environment variable holding the process-wide key.
pub const KEY_ENV: &str = "FLASHPAPER_ENCRYPTION_KEY";

/// Seal `plaintext` under `key`.
///
/// Output layout: `nonce(12) || ciphertext || tag(16)`.
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    SnippetCipher::new(key)?.seal(plaintext)
}

/// Open a blob produced by [`seal`].
pub fn open(blob: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    SnippetCipher::new(key)?.open(blob)
}

/// Process-wide snippet cipher holding a validated 32-byte key.
///
/// The key is zeroized on drop and never shown by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SnippetCipher {
    key: [u8; KEY_LEN],
}

impl SnippetCipher {
    /// Build a cipher from raw key bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherError::Configuration(
                "encryption key is missing".to_string(),
            ));
        }
        if key.len() != KEY_LEN {
            return Err(CipherError::Configuration(format!(
                "encryption key must be {} bytes, got {}",
                KEY_LEN,
                key.len()
            )));
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key);
        Ok(Self { key: bytes })
    }

    /// Build a cipher from configured key material.
    ///
    /// Accepts 64 hex characters, with surrounding whitespace ignored, or a
    /// 32-byte raw string taken exactly as given.
    pub fn from_key_material(material: &str) -> Result<Self> {
        let trimmed = material.trim();
        if trimmed.len() == KEY_LEN * 2 && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            let mut decoded = hex::decode(trimmed).map_err(|e| {
                CipherError::Configuration(format!("encryption key is not valid hex: {e}"))
            })?;
            let cipher = Self::new(&decoded);
            decoded.zeroize();
            return cipher;
        }
        Self::new(material.as_bytes())
    }

    /// Build a cipher from [`KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(KEY_ENV) {
            Ok(value) => Self::from_key_material(&value),
            Err(std::env::VarError::NotPresent) => Err(CipherError::Configuration(format!(
                "{KEY_ENV} is not set"
            ))),
            Err(std::env::VarError::NotUnicode(_)) => Err(CipherError::Configuration(format!(
                "{KEY_ENV} is not valid unicode"
            ))),
        }
    }

    /// Generate fresh key material, hex encoded.
    pub fn generate_key_hex() -> String {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        let encoded = hex::encode(key);
        key.zeroize();
        encoded
    }

    /// Seal plaintext with a fresh random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let cipher = ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CipherError::Encryption(format!("cipher init: {e}")))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| CipherError::Encryption(format!("encrypt: {e}")))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Open a sealed blob.
    ///
    /// Never returns partially decrypted data: any truncation, corruption or
    /// key mismatch is reported as [`CipherError::Tampered`].
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < NONCE_LEN {
            return Err(CipherError::Tampered("nonce is missing".to_string()));
        }
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Tampered("ciphertext too short".to_string()));
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);

        let cipher = ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CipherError::Tampered(format!("cipher init: {e}")))?;
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Tampered("authentication failed".to_string()))
    }

    /// Seal a string.
    pub fn seal_str(&self, plaintext: &str) -> Result<Vec<u8>> {
        self.seal(plaintext.as_bytes())
    }

    /// Open a blob that must hold UTF-8 text.
    pub fn open_to_string(&self, blob: &[u8]) -> Result<String> {
        let plaintext = self.open(blob)?;
        String::from_utf8(plaintext)
            .map_err(|_| CipherError::Tampered("plaintext is not valid UTF-8".to_string()))
    }
}

impl fmt::Debug for SnippetCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetCipher").field("key", &"<redacted>").finish()
    }
}
