//! Target repository reference.

use serde::Serialize;

use crate::error::{Result, ValidationError};

/// A GitHub repository identified by owner and name.
///
/// Both parts are non-empty; the value is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    /// Create a repository reference.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyRepoOwner` or `EmptyRepoName` if either
    /// part is empty.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() {
            return Err(ValidationError::EmptyRepoOwner.into());
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyRepoName.into());
        }
        Ok(Self { owner, name })
    }

    /// Account or organization owning the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
