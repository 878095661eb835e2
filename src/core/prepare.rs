//! Concurrent preparation of everything a delivery needs.
//!
//! Two tasks run side by side:
//!
//! 1. credentials -> public key (sequential; the key fetch needs the client)
//! 2. secret value
//!
//! The first failure cancels the sibling through a shared token. Both tasks
//! are drained before returning, and a [`Prepared`] bundle is only built
//! once both succeeded.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, Instrument};
use zeroize::Zeroizing;

use crate::core::domain::Props;
use crate::core::github::{fetch_public_key, CredentialResolver, GitHubApi, PublicKeyMaterial};
use crate::core::resolve::ValueResolver;
use crate::error::{Error, Result};

/// Everything needed to deliver one secret. Built once, then read-only.
pub struct Prepared {
    client: Arc<dyn GitHubApi>,
    public_key: PublicKeyMaterial,
    value: Zeroizing<String>,
}

impl Prepared {
    pub fn new(
        client: Arc<dyn GitHubApi>,
        public_key: PublicKeyMaterial,
        value: Zeroizing<String>,
    ) -> Self {
        Self {
            client,
            public_key,
            value,
        }
    }

    /// Client authenticated with the resolved token.
    pub fn client(&self) -> &dyn GitHubApi {
        self.client.as_ref()
    }

    pub fn public_key(&self) -> &PublicKeyMaterial {
        &self.public_key
    }

    pub fn key_id(&self) -> &str {
        self.public_key.key_id()
    }

    /// Plaintext secret value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Prepared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prepared")
            .field("key_id", &self.public_key.key_id())
            .field("value", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Result of one preparation task.
enum Fetched {
    Key(Arc<dyn GitHubApi>, PublicKeyMaterial),
    Value(Zeroizing<String>),
}

/// Runs the credential/key and value lookups concurrently.
#[derive(Clone)]
pub struct Preparer {
    credentials: CredentialResolver,
    values: ValueResolver,
}

impl Preparer {
    pub fn new(credentials: CredentialResolver, values: ValueResolver) -> Self {
        Self {
            credentials,
            values,
        }
    }

    /// Resolve client, public key and plaintext for `props`.
    ///
    /// # Errors
    ///
    /// Returns the first error observed from either task. A task stopped by
    /// cancellation never masks the error that caused it.
    #[instrument(skip_all, fields(repo = %props.repo(), secret = %props.secret_name()))]
    pub async fn prepare(&self, props: &Props) -> Result<Prepared> {
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        let credentials = self.credentials.clone();
        let reference = props.credential_ref().to_string();
        let repo = props.repo().clone();
        tasks.spawn(
            until_cancelled(cancel.clone(), async move {
                let client = credentials.resolve(&reference).await?;
                let key = fetch_public_key(client.as_ref(), &repo).await?;
                Ok(Fetched::Key(client, key))
            })
            .in_current_span(),
        );

        let values = self.values.clone();
        let request = props.clone();
        tasks.spawn(
            until_cancelled(cancel.clone(), async move {
                let value = values.resolve(&request).await?;
                Ok(Fetched::Value(value))
            })
            .in_current_span(),
        );

        let mut key = None;
        let mut value = None;
        let mut first_error: Option<Error> = None;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| Error::Task(e.to_string()))
                .and_then(|fetched| fetched);

            match outcome {
                Ok(Fetched::Key(client, material)) => key = Some((client, material)),
                Ok(Fetched::Value(v)) => value = Some(v),
                Err(err) => {
                    if first_error.is_none() {
                        debug!(error = %err, "preparation failed, cancelling sibling");
                        cancel.cancel();
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        match (key, value) {
            (Some((client, public_key)), Some(value)) => {
                debug!(key_id = %public_key.key_id(), "prepared");
                Ok(Prepared::new(client, public_key, value))
            }
            _ => Err(Error::Task(
                "preparation finished without a result".to_string(),
            )),
        }
    }
}

/// Run `work` unless `cancel` fires first.
async fn until_cancelled<T>(
    cancel: CancellationToken,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = work => result,
    }
}
