//! Secret value resolution.
//!
//! Reads the plaintext secret from the source named by the request.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use zeroize::Zeroizing;

use crate::core::domain::{Props, SecretSource};
use crate::core::store::{ParameterStore, SecretStore};
use crate::error::Result;

/// Resolves the plaintext for a request from its configured source.
#[derive(Clone)]
pub struct ValueResolver {
    secrets: Arc<dyn SecretStore>,
    parameters: Arc<dyn ParameterStore>,
}

impl ValueResolver {
    pub fn new(secrets: Arc<dyn SecretStore>, parameters: Arc<dyn ParameterStore>) -> Self {
        Self {
            secrets,
            parameters,
        }
    }

    /// Return the plaintext secret value.
    ///
    /// - `PlainText`: the literal from the request, no external call.
    /// - `ParameterStore`: the parameter named by the request value, read
    ///   with decryption.
    /// - `SecretsManager`: the string payload of the secret identified by
    ///   the request value.
    ///
    /// A store that returns no value yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` if the backing store lookup fails.
    #[instrument(skip_all, fields(source = %props.source()))]
    pub async fn resolve(&self, props: &Props) -> Result<Zeroizing<String>> {
        let locator = props.secret_value();
        let value = match props.source() {
            SecretSource::PlainText => return Ok(Zeroizing::new(locator.to_string())),
            SecretSource::ParameterStore => self.parameters.decrypted_parameter(locator).await?,
            SecretSource::SecretsManager => self.secrets.secret_string(locator).await?,
        };

        match value {
            Some(value) => {
                debug!(value_len = value.len(), "secret value resolved");
                Ok(value)
            }
            None => {
                warn!(reference = %locator, "store returned no value, delivering empty secret");
                Ok(Zeroizing::new(String::new()))
            }
        }
    }
}
