//! Configuration file management.
//!
//! Handles reading and validating the optional `ghsecret.toml` file. Every
//! setting has a default, so running without a file is the common case.
//!
//! ```toml
//! [github]
//! api_url = "https://ghe.example.com/api/v3"
//! user_agent = "acme-provisioner"
//!
//! [aws]
//! region = "us-east-1"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,
    /// AWS SDK overrides
    #[serde(default)]
    pub aws: AwsConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// REST API base URL; GitHub Enterprise Server uses `https://HOST/api/v3`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// `User-Agent` sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// AWS SDK overrides; unset fields fall back to the default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint, e.g. LocalStack
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_api_url() -> String {
    constants::DEFAULT_GITHUB_API_URL.to_string()
}

fn default_user_agent() -> String {
    constants::DEFAULT_USER_AGENT.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Path of the default configuration file in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `ghsecret.toml` in the
    /// current directory is used if present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// Validation is left to [`Config::validate`] so that flag and
    /// environment overrides apply first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Override the GitHub API URL (from a CLI flag or environment).
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.github.api_url = url;
        }
        self
    }

    /// Override the AWS region (from a CLI flag or environment).
    pub fn with_region(mut self, region: Option<String>) -> Self {
        if region.is_some() {
            self.aws.region = region;
        }
        self
    }

    /// Parsed GitHub API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is not an absolute
    /// http(s) URL that can carry path segments.
    pub fn api_url(&self) -> Result<reqwest::Url> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "github.api_url",
            reason,
        };

        let url = reqwest::Url::parse(&self.github.api_url)
            .map_err(|e| invalid(format!("{}: {}", self.github.api_url, e)))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(invalid(format!("unsupported scheme: {}", url.scheme())).into());
        }
        if url.cannot_be_a_base() {
            return Err(invalid(format!("not a base URL: {}", url)).into());
        }
        Ok(url)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` or `ConfigError::InvalidValue`.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.github.api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "github.api_url",
            }
            .into());
        }
        self.api_url()?;

        if self.github.user_agent.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "github.user_agent",
            }
            .into());
        }

        if let Some(region) = &self.aws.region {
            if region.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "aws.region",
                    reason: "empty region".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
