//! ghsecret - CloudFormation custom resource provider for GitHub Actions secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ghsecret::cli::output;
use ghsecret::cli::{execute, Cli, LogFormat};
use ghsecret::core::constants::LOG_ENV;
use ghsecret::error::{ConfigError, Error, Service, UpstreamError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ghsecret=debug")
        } else {
            EnvFilter::new("ghsecret=info")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    if let Err(e) = execute(cli).await {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(err: &Error) -> Option<&'static str> {
    match err {
        Error::Config(ConfigError::InvalidValue { .. } | ConfigError::MissingField { .. }) => {
            Some("check ghsecret.toml and the --github-api-url flag")
        }
        Error::Upstream(UpstreamError::MissingValue { .. }) => {
            Some("the token secret must hold a plain string, not binary data")
        }
        Error::Upstream(e) if e.service() == Service::SecretsManager => {
            Some("check that the provider role can read the secret (secretsmanager:GetSecretValue)")
        }
        Error::Upstream(e) if e.service() == Service::ParameterStore => {
            Some("check that the provider role can read the parameter (ssm:GetParameter, kms:Decrypt)")
        }
        Error::Upstream(UpstreamError::Status { status: 401 | 403 | 404, .. }) => {
            Some("the GitHub token needs the `repo` scope and access to the repository")
        }
        _ => None,
    }
}
