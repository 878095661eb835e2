//! Constants used throughout ghsecret.
//!
//! Centralizes wire names, header values and defaults.

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "ghsecret.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "GHSECRET_LOG";

/// Public GitHub REST API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// REST API version pinned on every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Media type for GitHub REST responses.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Default `User-Agent`; GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("ghsecret/", env!("CARGO_PKG_VERSION"));

/// Length of a Curve25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// `SecretResourceType` tag for an inline literal.
pub const SOURCE_PLAIN_TEXT: &str = "PlainText";

/// `SecretResourceType` tag for an AWS Secrets Manager secret.
pub const SOURCE_SECRETS_MANAGER: &str = "AWS::SecretsManager::Secret";

/// `SecretResourceType` tag for an AWS SSM parameter.
pub const SOURCE_SSM_PARAMETER: &str = "AWS::SSM::Parameter";
