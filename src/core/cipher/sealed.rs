//! libsodium-compatible sealed box.

use crypto_box::aead::OsRng;
use tracing::trace;

use super::Cipher;
use crate::error::{CipherError, Result};

/// Anonymous public-key encryption (`crypto_box_seal`).
///
/// Each call generates a fresh ephemeral key pair, so sealing the same
/// plaintext twice yields different ciphertexts.
pub struct SealedBox;

/// Bytes a sealed box adds to the plaintext: ephemeral public key plus MAC.
pub const SEAL_OVERHEAD: usize = 32 + 16;

impl Cipher for SealedBox {
    type Recipient = crypto_box::PublicKey;

    fn name(&self) -> &'static str {
        "sealed-box"
    }

    fn encrypt(&self, plaintext: &[u8], recipient: &crypto_box::PublicKey) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let sealed = recipient
            .seal(&mut OsRng, plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = sealed.len(), "sealed");
        Ok(sealed)
    }
}

#[cfg(test)]
pub(crate) fn open(ciphertext: &[u8], secret_key: &crypto_box::SecretKey) -> Result<Vec<u8>> {
    secret_key
        .unseal(ciphertext)
        .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)).into())
}
