//! Bearer token resolution.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{ClientFactory, GitHubApi};
use crate::core::store::SecretStore;
use crate::error::{ConfigError, Result, Service, UpstreamError};

/// Exchanges a secret-store reference for an authenticated GitHub client.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn SecretStore>,
    factory: Arc<dyn ClientFactory>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn SecretStore>, factory: Arc<dyn ClientFactory>) -> Self {
        Self { store, factory }
    }

    /// Read the token stored under `reference` and build a client for it.
    ///
    /// Performs exactly one secret-store read.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `reference` is empty or the client cannot
    /// be built, and `UpstreamError` if the lookup fails or the secret has
    /// no string value.
    #[instrument(skip(self))]
    pub async fn resolve(&self, reference: &str) -> Result<Arc<dyn GitHubApi>> {
        if reference.is_empty() {
            return Err(ConfigError::MissingField {
                field: "GitHubAuthTokenSecretArn",
            }
            .into());
        }

        let token = self
            .store
            .secret_string(reference)
            .await?
            .ok_or_else(|| UpstreamError::MissingValue {
                service: Service::SecretsManager,
                reference: reference.to_string(),
            })?;

        debug!("github token resolved");
        self.factory.connect(token)
    }
}
