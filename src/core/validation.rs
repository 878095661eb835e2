//! Resource property decoding and validation.
//!
//! Turns the untyped `ResourceProperties` bag of a lifecycle event into a
//! [`Props`]. Nothing downstream ever sees the raw bag.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::domain::{Props, Repository, SecretSource};
use crate::error::{Result, ValidationError};

/// Property bag as written by the CDK construct (PascalCase keys).
///
/// Every field defaults to empty so that a missing key is reported as the
/// specific empty-field error rather than a generic decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProps {
    #[serde(rename = "Repo", alias = "repo")]
    repo: RawRepo,
    #[serde(rename = "SecretName", alias = "secretName")]
    secret_name: String,
    #[serde(rename = "SecretValue", alias = "secretValue")]
    secret_value: String,
    #[serde(rename = "SecretResourceType", alias = "secretResourceType")]
    secret_resource_type: String,
    #[serde(
        rename = "GitHubAuthTokenSecretArn",
        alias = "gitHubAuthTokenSecretArn"
    )]
    credential_ref: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRepo {
    #[serde(rename = "Owner", alias = "owner")]
    owner: String,
    #[serde(rename = "Name", alias = "name")]
    name: String,
}

/// Decode and validate resource properties.
///
/// Checks run in a fixed order (owner, name, secret name, secret value,
/// credential reference, source kind) and the first failure is returned.
///
/// # Errors
///
/// Returns `ValidationError::Malformed` if a field has the wrong JSON type,
/// otherwise the `ValidationError` for the first invalid field.
pub fn decode_props(raw: &Map<String, Value>) -> Result<Props> {
    let raw: RawProps = serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let repo = Repository::new(raw.repo.owner, raw.repo.name)?;
    validate_secret_name(&raw.secret_name)?;
    if raw.secret_value.is_empty() {
        return Err(ValidationError::EmptySecretValue.into());
    }
    if raw.credential_ref.is_empty() {
        return Err(ValidationError::EmptyCredentialRef.into());
    }
    let source: SecretSource = raw.secret_resource_type.parse()?;

    Props::new(
        repo,
        raw.secret_name,
        raw.secret_value,
        source,
        raw.credential_ref,
    )
}

/// Validate a GitHub Actions secret name.
///
/// Secret names may only contain alphanumerics and underscores, cannot
/// start with a digit, and cannot use the reserved `GITHUB_` prefix.
///
/// # Errors
///
/// Returns `ValidationError::EmptySecretName` if the name is empty, or
/// `ValidationError::Malformed` describing the offending character.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptySecretName.into());
    }

    if let Some(first) = name.chars().next() {
        if first.is_ascii_digit() {
            return Err(ValidationError::Malformed(format!(
                "SecretName {} cannot start with a digit",
                name
            ))
            .into());
        }
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::Malformed(format!(
                "SecretName {}: invalid character '{}' at position {}",
                name,
                ch,
                i + 1
            ))
            .into());
        }
    }

    if name.to_ascii_uppercase().starts_with("GITHUB_") {
        return Err(ValidationError::Malformed(format!(
            "SecretName {} uses the reserved GITHUB_ prefix",
            name
        ))
        .into());
    }

    Ok(())
}
