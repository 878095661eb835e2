//! Repository public key retrieval and decoding.

use base64::Engine;
use tracing::{debug, instrument};

use super::{GitHubApi, RepositoryPublicKey};
use crate::core::constants::PUBLIC_KEY_LEN;
use crate::core::domain::Repository;
use crate::core::types::KeyId;
use crate::error::{ProtocolError, Result};

/// A decoded repository public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    key: [u8; PUBLIC_KEY_LEN],
    key_id: KeyId,
}

impl PublicKeyMaterial {
    pub fn new(key: [u8; PUBLIC_KEY_LEN], key_id: impl Into<KeyId>) -> Self {
        Self {
            key,
            key_id: key_id.into(),
        }
    }

    pub fn key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.key
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Decode the base64 key of an API response into a fixed-size key.
///
/// # Errors
///
/// Returns `ProtocolError::InvalidKeyEncoding` if the key is not standard
/// base64 and `ProtocolError::InvalidKeyLength` unless it decodes to
/// exactly 32 bytes.
pub fn decode_public_key(raw: &RepositoryPublicKey) -> Result<PublicKeyMaterial> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw.key.as_bytes())
        .map_err(|e| ProtocolError::InvalidKeyEncoding(e.to_string()))?;

    let key: [u8; PUBLIC_KEY_LEN] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| ProtocolError::InvalidKeyLength(bytes.len()))?;

    Ok(PublicKeyMaterial::new(key, raw.key_id.clone()))
}

/// Fetch and decode the current public key of `repo`.
///
/// Single attempt; any failure aborts the provisioning operation.
///
/// # Errors
///
/// Returns `UpstreamError` if the API call fails and `ProtocolError` if the
/// key cannot be decoded.
#[instrument(skip_all, fields(repo = %repo))]
pub async fn fetch_public_key(
    client: &dyn GitHubApi,
    repo: &Repository,
) -> Result<PublicKeyMaterial> {
    let raw = client.repository_public_key(repo).await?;
    let material = decode_public_key(&raw)?;
    debug!(key_id = %material.key_id(), "public key fetched");
    Ok(material)
}
