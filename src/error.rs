//! Error types for ghsecret.
//!
//! Each failure surface gets its own enum; [`Error`] wraps them so callers
//! can match on the category while `?` converts automatically.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// A task was stopped because its sibling failed first.
    #[error("operation cancelled")]
    Cancelled,

    /// The handler did not finish within the deadline.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    /// A spawned task panicked or was aborted.
    #[error("background task failed: {0}")]
    Task(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed or incomplete provisioning request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Repo.Owner is empty")]
    EmptyRepoOwner,

    #[error("Repo.Name is empty")]
    EmptyRepoName,

    #[error("SecretName is empty")]
    EmptySecretName,

    #[error("SecretValue is empty")]
    EmptySecretValue,

    #[error("GitHubAuthTokenSecretArn is empty")]
    EmptyCredentialRef,

    #[error("invalid SecretResourceType: {0}")]
    UnknownSourceKind(String),

    #[error("unknown request type: {0}")]
    UnknownRequestType(String),

    #[error("invalid resource properties: {0}")]
    Malformed(String),

    #[error("invalid event: {0}")]
    Event(String),
}

/// Identifies which remote service an [`UpstreamError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    SecretsManager,
    ParameterStore,
    GitHub,
    ResponseUrl,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SecretsManager => "secrets manager",
            Self::ParameterStore => "parameter store",
            Self::GitHub => "github",
            Self::ResponseUrl => "response url",
        };
        f.write_str(name)
    }
}

/// A remote call failed.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} request failed: {message}")]
    Request { service: Service, message: String },

    #[error("{service} returned HTTP {status}: {message}")]
    Status {
        service: Service,
        status: u16,
        message: String,
    },

    #[error("{service} returned no string value for {reference}")]
    MissingValue { service: Service, reference: String },
}

impl UpstreamError {
    /// Wrap any displayable failure from `service`.
    pub fn request(service: Service, err: impl std::fmt::Display) -> Self {
        Self::Request {
            service,
            message: err.to_string(),
        }
    }

    /// The service the failure came from.
    pub fn service(&self) -> Service {
        match self {
            Self::Request { service, .. }
            | Self::Status { service, .. }
            | Self::MissingValue { service, .. } => *service,
        }
    }
}

/// Upstream data that could not be decoded.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("public key is not valid base64: {0}")]
    InvalidKeyEncoding(String),

    #[error("public key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("unexpected response body: {0}")]
    InvalidBody(String),
}

/// Deployment or configuration defect.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to build GitHub client: {0}")]
    ClientBuild(String),
}

/// Sealing a secret failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
