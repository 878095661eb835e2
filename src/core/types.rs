//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// Name of a GitHub Actions secret (e.g., DEPLOY_TOKEN).
pub type SecretName = String;

/// Identifier GitHub assigns to a repository's current public key.
pub type KeyId = String;

/// Base64-encoded sealed-box ciphertext, as sent to GitHub.
pub type EncryptedValue = String;

/// Opaque locator of a stored value (Secrets Manager ARN, SSM parameter name).
pub type Reference = String;

/// CloudFormation physical resource identifier.
pub type PhysicalResourceId = String;
