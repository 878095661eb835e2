//! Backing stores for secret material.
//!
//! Abstracts the two AWS services secret values and GitHub tokens are read
//! from, so the pipeline can be driven by in-memory stores in tests.
//!
//! ## Adding a New Store
//!
//! 1. Implement `SecretStore` or `ParameterStore`
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Vault { /* ... */ }
//!
//! #[async_trait]
//! impl SecretStore for Vault {
//!     async fn secret_string(&self, secret_id: &str) -> Result<Option<Zeroizing<String>>> {
//!         // Read from vault
//!     }
//! }
//! ```

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::Result;

mod aws;

pub use aws::{load_sdk_config, SecretsManager, Ssm};

/// Secret store keyed by identifier (AWS Secrets Manager semantics).
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the string payload of a secret.
    ///
    /// # Returns
    ///
    /// `None` if the secret exists but holds no string payload
    /// (e.g. a binary secret).
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` if the lookup fails, including not-found.
    async fn secret_string(&self, secret_id: &str) -> Result<Option<Zeroizing<String>>>;
}

/// Parameter store keyed by name (AWS SSM semantics).
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Read a parameter, decrypting `SecureString` values.
    ///
    /// # Returns
    ///
    /// `None` if the response carries no value.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` if the lookup fails, including not-found.
    async fn decrypted_parameter(&self, name: &str) -> Result<Option<Zeroizing<String>>>;
}
