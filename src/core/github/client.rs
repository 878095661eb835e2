//! REST implementation of [`GitHubApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use super::{ClientFactory, EncryptedSecret, GitHubApi, RepositoryPublicKey};
use crate::core::config::Config;
use crate::core::constants::{GITHUB_ACCEPT, GITHUB_API_VERSION};
use crate::core::domain::Repository;
use crate::error::{ConfigError, ProtocolError, Result, Service, UpstreamError};

/// GitHub REST client bound to one bearer token.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    api_url: Url,
}

/// Error body GitHub returns on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl RestClient {
    /// Build a client sending `token` to `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ClientBuild` if the token or user agent cannot
    /// be sent as a header, or the HTTP client cannot be initialized.
    pub fn new(api_url: Url, user_agent: &str, token: &str) -> Result<Self> {
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "github.api_url",
                reason: format!("not a base URL: {}", api_url),
            }
            .into());
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ConfigError::ClientBuild("token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| ConfigError::ClientBuild(format!("invalid user agent: {}", e)))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        Ok(Self { http, api_url })
    }

    /// `{api_url}/repos/{owner}/{repo}/actions/secrets/{tail...}`
    fn secrets_url(&self, repo: &Repository, tail: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "repos",
                repo.owner(),
                repo.name(),
                "actions",
                "secrets",
                tail,
            ]);
        }
        url
    }

    /// Turn a non-2xx response into an `UpstreamError`.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(UpstreamError::Status {
            service: Service::GitHub,
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

#[async_trait]
impl GitHubApi for RestClient {
    #[instrument(name = "github.get_repo_public_key", skip_all, fields(repo = %repo))]
    async fn repository_public_key(&self, repo: &Repository) -> Result<RepositoryPublicKey> {
        let url = self.secrets_url(repo, "public-key");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(Service::GitHub, e))?;
        let response = Self::check(response).await?;

        response
            .json::<RepositoryPublicKey>()
            .await
            .map_err(|e| ProtocolError::InvalidBody(e.to_string()).into())
    }

    #[instrument(
        name = "github.put_repo_secret",
        skip_all,
        fields(repo = %repo, secret = %secret.name)
    )]
    async fn put_repository_secret(
        &self,
        repo: &Repository,
        secret: &EncryptedSecret,
    ) -> Result<()> {
        let url = self.secrets_url(repo, &secret.name);
        let response = self
            .http
            .put(url)
            .json(secret)
            .send()
            .await
            .map_err(|e| UpstreamError::request(Service::GitHub, e))?;
        let response = Self::check(response).await?;

        // 201 when created, 204 when an existing secret was overwritten
        debug!(status = response.status().as_u16(), "secret stored");
        Ok(())
    }
}

/// Builds a [`RestClient`] per bearer token.
#[derive(Debug, Clone)]
pub struct RestClientFactory {
    api_url: Url,
    user_agent: String,
}

impl RestClientFactory {
    pub fn new(api_url: Url, user_agent: impl Into<String>) -> Self {
        Self {
            api_url,
            user_agent: user_agent.into(),
        }
    }

    /// Build a factory from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the API URL is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.api_url()?, config.github.user_agent.clone()))
    }
}

impl ClientFactory for RestClientFactory {
    fn connect(&self, token: Zeroizing<String>) -> Result<Arc<dyn GitHubApi>> {
        let client = RestClient::new(self.api_url.clone(), &self.user_agent, &token)?;
        Ok(Arc::new(client))
    }
}
