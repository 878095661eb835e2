//! AWS-backed stores.
//!
//! Credentials come from the default provider chain (environment, profile,
//! container or instance role). Region and endpoint can be pinned through
//! the `[aws]` config section.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use super::{ParameterStore, SecretStore};
use crate::core::config::AwsConfig;
use crate::error::{Result, Service, UpstreamError};

/// Load shared SDK configuration, honoring config overrides.
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let config = loader.load().await;
    debug!(region = ?config.region(), "loaded AWS config");
    config
}

/// AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct SecretsManager {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManager {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_secretsmanager::Client::new(config),
        }
    }
}

#[async_trait]
impl SecretStore for SecretsManager {
    #[instrument(name = "secretsmanager.get_secret_value", skip(self))]
    async fn secret_string(&self, secret_id: &str) -> Result<Option<Zeroizing<String>>> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                UpstreamError::request(
                    Service::SecretsManager,
                    aws_sdk_secretsmanager::error::DisplayErrorContext(&e),
                )
            })?;

        debug!(has_string = output.secret_string().is_some(), "secret read");
        Ok(output
            .secret_string()
            .map(|s| Zeroizing::new(s.to_string())))
    }
}

/// AWS Systems Manager Parameter Store.
#[derive(Debug, Clone)]
pub struct Ssm {
    client: aws_sdk_ssm::Client,
}

impl Ssm {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

#[async_trait]
impl ParameterStore for Ssm {
    #[instrument(name = "ssm.get_parameter", skip(self))]
    async fn decrypted_parameter(&self, name: &str) -> Result<Option<Zeroizing<String>>> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                UpstreamError::request(
                    Service::ParameterStore,
                    aws_sdk_ssm::error::DisplayErrorContext(&e),
                )
            })?;

        let value = output
            .parameter()
            .and_then(|p| p.value())
            .map(|v| Zeroizing::new(v.to_string()));
        debug!(has_value = value.is_some(), "parameter read");
        Ok(value)
    }
}
