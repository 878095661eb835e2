//! Validated provisioning request.

use zeroize::Zeroizing;

use super::{Repository, SecretSource};
use crate::core::types::{Reference, SecretName};
use crate::error::{Result, ValidationError};

/// A provisioning request that passed validation.
///
/// The secret value is the literal secret for [`SecretSource::PlainText`]
/// and the store locator (secret ARN, parameter name) otherwise.
#[derive(Clone)]
pub struct Props {
    repo: Repository,
    secret_name: SecretName,
    secret_value: Zeroizing<String>,
    source: SecretSource,
    credential_ref: Reference,
}

impl Props {
    /// Build a request, rejecting empty fields.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` naming the first empty field.
    pub fn new(
        repo: Repository,
        secret_name: impl Into<SecretName>,
        secret_value: impl Into<String>,
        source: SecretSource,
        credential_ref: impl Into<Reference>,
    ) -> Result<Self> {
        let secret_name = secret_name.into();
        let secret_value = Zeroizing::new(secret_value.into());
        let credential_ref = credential_ref.into();

        if secret_name.is_empty() {
            return Err(ValidationError::EmptySecretName.into());
        }
        if secret_value.is_empty() {
            return Err(ValidationError::EmptySecretValue.into());
        }
        if credential_ref.is_empty() {
            return Err(ValidationError::EmptyCredentialRef.into());
        }

        Ok(Self {
            repo,
            secret_name,
            secret_value,
            source,
            credential_ref,
        })
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Literal value or store locator, depending on [`Props::source`].
    pub fn secret_value(&self) -> &str {
        &self.secret_value
    }

    pub fn source(&self) -> SecretSource {
        self.source
    }

    /// Secrets Manager reference holding the GitHub token.
    pub fn credential_ref(&self) -> &str {
        &self.credential_ref
    }

    /// Physical id used when the event does not carry one.
    pub fn default_physical_id(&self) -> String {
        format!("{}/{}", self.repo, self.secret_name)
    }
}

impl std::fmt::Debug for Props {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: &str = match self.source {
            SecretSource::PlainText => "<redacted>",
            _ => &self.secret_value,
        };
        f.debug_struct("Props")
            .field("repo", &self.repo)
            .field("secret_name", &self.secret_name)
            .field("secret_value", &value)
            .field("source", &self.source)
            .field("credential_ref", &self.credential_ref)
            .finish()
    }
}
