//! Sealed-box encryption for GitHub Actions secrets.
//!
//! GitHub expects secret values sealed with libsodium's anonymous
//! `crypto_box_seal` under the repository public key, then base64 encoded.
//!
//! ## Backends
//!
//! - **sealed box**: X25519 + XSalsa20-Poly1305, one ephemeral key per call.
//!
//! Only the holder of the matching private key (GitHub) can open the result;
//! nothing here ever sees private key material.

use base64::Engine;

use crate::core::constants::PUBLIC_KEY_LEN;
use crate::core::types::EncryptedValue;
use crate::error::Result;

mod sealed;

pub use sealed::{SealedBox, SEAL_OVERHEAD};

/// Encryption backend trait.
///
/// Recipients are backend-specific; for the sealed box it is a raw
/// Curve25519 public key.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Encrypt plaintext for a single recipient.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipient: &Self::Recipient) -> Result<Vec<u8>>;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Seal `plaintext` for `public_key` and base64-encode the ciphertext.
///
/// This is the wire form of `encrypted_value` in the GitHub API. Empty
/// plaintext is accepted and yields a valid (48 byte) ciphertext.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if sealing fails.
pub fn encrypt(plaintext: &str, public_key: &[u8; PUBLIC_KEY_LEN]) -> Result<EncryptedValue> {
    let recipient = crypto_box::PublicKey::from(*public_key);
    let sealed = SealedBox.encrypt(plaintext.as_bytes(), &recipient)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(sealed))
}
