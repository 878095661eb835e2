//! GitHub Actions secrets API.
//!
//! The pipeline talks to GitHub through [`GitHubApi`], built per request by
//! a [`ClientFactory`] from a bearer token. The REST implementation lives in
//! [`client`]; tests substitute in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::domain::Repository;
use crate::core::types::{EncryptedValue, KeyId, SecretName};
use crate::error::Result;

pub mod client;
pub mod credentials;
pub mod keys;

pub use client::{RestClient, RestClientFactory};
pub use credentials::CredentialResolver;
pub use keys::{decode_public_key, fetch_public_key, PublicKeyMaterial};

/// Repository public key as returned by the API (key still base64).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPublicKey {
    pub key_id: KeyId,
    pub key: String,
}

/// Payload of a create-or-update secret call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptedSecret {
    /// Secret name; part of the URL, not the body.
    #[serde(skip)]
    pub name: SecretName,
    pub key_id: KeyId,
    pub encrypted_value: EncryptedValue,
}

/// Authenticated access to the repository secrets endpoints.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch the key secrets for `repo` must be sealed with.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on transport, auth or not-found failures and
    /// `ProtocolError` if the body cannot be decoded.
    async fn repository_public_key(&self, repo: &Repository) -> Result<RepositoryPublicKey>;

    /// Create or overwrite a repository secret.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` if the call fails.
    async fn put_repository_secret(&self, repo: &Repository, secret: &EncryptedSecret)
        -> Result<()>;
}

/// Builds authenticated clients from a bearer token.
pub trait ClientFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns `ConfigError` if a client cannot be built for this token.
    fn connect(&self, token: Zeroizing<String>) -> Result<Arc<dyn GitHubApi>>;
}
