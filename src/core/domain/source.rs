//! Secret value source kinds.

use std::str::FromStr;

use crate::core::constants::{SOURCE_PLAIN_TEXT, SOURCE_SECRETS_MANAGER, SOURCE_SSM_PARAMETER};
use crate::error::ValidationError;

/// Where the plaintext secret value comes from.
///
/// Decoded from the `SecretResourceType` property; unknown tags are rejected
/// at decode time so resolvers can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretSource {
    /// The `SecretValue` property is the secret itself.
    PlainText,
    /// `SecretValue` identifies an AWS Secrets Manager secret.
    SecretsManager,
    /// `SecretValue` names an AWS SSM parameter.
    ParameterStore,
}

impl SecretSource {
    /// Wire tag used in resource properties.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PlainText => SOURCE_PLAIN_TEXT,
            Self::SecretsManager => SOURCE_SECRETS_MANAGER,
            Self::ParameterStore => SOURCE_SSM_PARAMETER,
        }
    }
}

impl FromStr for SecretSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SOURCE_PLAIN_TEXT => Ok(Self::PlainText),
            SOURCE_SECRETS_MANAGER => Ok(Self::SecretsManager),
            SOURCE_SSM_PARAMETER => Ok(Self::ParameterStore),
            other => Err(ValidationError::UnknownSourceKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
