//! Sealing and storing the secret on GitHub.

use tracing::{debug, instrument};

use crate::core::cipher::{self, Cipher, SealedBox};
use crate::core::domain::Repository;
use crate::core::github::EncryptedSecret;
use crate::core::prepare::Prepared;
use crate::error::Result;

/// Seal the prepared plaintext and upsert it as `name` on `repo`.
///
/// GitHub overwrites an existing secret of the same name, so repeating a
/// delivery converges to the same remote state. Nothing is rolled back on
/// failure.
///
/// # Errors
///
/// Returns `CipherError` if sealing fails and `UpstreamError` if the API
/// call fails.
#[instrument(skip_all, fields(repo = %repo, secret = %name))]
pub async fn deliver(prepared: &Prepared, repo: &Repository, name: &str) -> Result<()> {
    let encrypted_value = cipher::encrypt(prepared.value(), prepared.public_key().key())?;
    debug!(
        cipher = SealedBox.name(),
        key_id = %prepared.key_id(),
        "secret sealed"
    );

    let secret = EncryptedSecret {
        name: name.to_string(),
        key_id: prepared.key_id().to_string(),
        encrypted_value,
    };
    prepared.client().put_repository_secret(repo, &secret).await
}
