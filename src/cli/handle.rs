//! Handle command.
//!
//! Wires the AWS stores and GitHub client into a [`Provider`], handles one
//! event and reports the result. Once the event is decoded a response
//! document is always produced; Delete never loads config or AWS settings.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::domain::{Event, RequestType};
use crate::core::github::{CredentialResolver, RestClientFactory};
use crate::core::lifecycle::{self, Outcome, Provider};
use crate::core::prepare::Preparer;
use crate::core::resolve::ValueResolver;
use crate::core::response::{self, ResponseDocument};
use crate::core::store::{self, ParameterStore, SecretStore, SecretsManager, Ssm};
use crate::core::validation::decode_props;
use crate::error::{Error, Result};

use super::output;

/// Options of the handle command.
#[derive(Debug, Default)]
pub struct Settings {
    /// Explicit config file
    pub config: Option<PathBuf>,
    pub github_api_url: Option<String>,
    pub region: Option<String>,
    /// Also PUT the response to the event's ResponseURL
    pub respond: bool,
    /// Deadline in seconds for Create and Update
    pub timeout: Option<u64>,
}

/// Handle the event read from `source`.
///
/// The response document is always printed to stdout. A failed outcome is
/// returned as the error so the process exits non-zero.
pub async fn execute(settings: &Settings, source: &str) -> Result<()> {
    let event = super::read_event(source).await?;

    let outcome = match event.request_type {
        RequestType::Delete => lifecycle::delete(&event),
        RequestType::Create | RequestType::Update => provision(settings, &event).await,
    };

    let document = ResponseDocument::new(&event, &outcome);
    output::json(&document.to_json()?);

    if settings.respond {
        if let Err(err) = response::send(&reqwest::Client::new(), &event, &document).await {
            if let Some(cause) = &outcome.error {
                output::error(&cause.to_string());
            }
            return Err(err);
        }
        output::success("response delivered");
    }

    match outcome.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Run Create or Update. Setup failures become a failed outcome.
async fn provision(settings: &Settings, event: &Event) -> Outcome {
    let provider = match load_config(settings) {
        Ok(config) => build_provider(&config).await,
        Err(err) => Err(err),
    };
    let provider = match provider {
        Ok(provider) => provider,
        Err(err) => {
            warn!(error = %err, "provider setup failed");
            return failure(event, err);
        }
    };

    match settings.timeout {
        Some(secs) => {
            match tokio::time::timeout(Duration::from_secs(secs), provider.handle(event)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(secs, "handler timed out");
                    failure(event, Error::Timeout { secs })
                }
            }
        }
        None => provider.handle(event).await,
    }
}

/// Load the config file and apply flag and environment overrides.
fn load_config(settings: &Settings) -> Result<Config> {
    let config = Config::load(settings.config.as_deref())?
        .with_api_url(settings.github_api_url.clone())
        .with_region(settings.region.clone());
    config.validate()?;
    Ok(config)
}

/// Build a provider backed by AWS and the GitHub REST API.
pub async fn build_provider(config: &Config) -> Result<Provider> {
    let factory = Arc::new(RestClientFactory::from_config(config)?);
    let sdk = store::load_sdk_config(&config.aws).await;
    let secrets: Arc<dyn SecretStore> = Arc::new(SecretsManager::new(&sdk));
    let parameters: Arc<dyn ParameterStore> = Arc::new(Ssm::new(&sdk));
    debug!(api_url = %config.github.api_url, "provider ready");

    Ok(Provider::new(Preparer::new(
        CredentialResolver::new(secrets.clone(), factory),
        ValueResolver::new(secrets, parameters),
    )))
}

/// Failed outcome carrying the same physical id a success would.
fn failure(event: &Event, err: Error) -> Outcome {
    let props = decode_props(&event.resource_properties).ok();
    Outcome::failure(lifecycle::physical_id(event, props.as_ref()), err)
}
