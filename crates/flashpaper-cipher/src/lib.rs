//! Flashpaper Cipher
//!
//! Authenticated symmetric encryption of snippet content at rest. Knows
//! nothing about storage or scheduling.
//!
//! Each seal draws a fresh random nonce and embeds it at the front of the
//! output, so a blob can be opened with nothing but the key:
//!
//! ```text
//! +-----------+---------------------+-----------+
//! | nonce(12) | ciphertext (len(m)) | tag(16)   |
//! +-----------+---------------------+-----------+
//! ```
//!
//! # Examples
//!
//! ```
//! use flashpaper_cipher::SnippetCipher;
//!
//! let cipher = SnippetCipher::from_key_material(&SnippetCipher::generate_key_hex()).unwrap();
//! let blob = cipher.seal(b"burn after reading").unwrap();
//! assert_eq!(cipher.open(&blob).unwrap(), b"burn after reading");
//! ```

#![warn(missing_docs)]

mod cipher;
mod error;

pub use cipher::{open, seal, SnippetCipher, KEY_ENV, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use error::{CipherError, Result};
