//! In-memory stand-ins for AWS and GitHub.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use zeroize::Zeroizing;

use ghsecret::core::domain::Repository;
use ghsecret::core::github::{ClientFactory, EncryptedSecret, GitHubApi, RepositoryPublicKey};
use ghsecret::core::store::{ParameterStore, SecretStore};
use ghsecret::error::{ConfigError, Result, Service, UpstreamError};

/// How a fake store answers.
#[derive(Clone)]
enum Behavior {
    Normal,
    Fail(String),
    Hang,
    Delay(Duration),
}

/// Shared lookup logic for both fake stores.
struct Table {
    service: Service,
    values: HashMap<String, Option<String>>,
    behavior: Behavior,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl Table {
    fn new(service: Service) -> Self {
        Self {
            service,
            values: HashMap::new(),
            behavior: Behavior::Normal,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(key.to_string());

        match &self.behavior {
            Behavior::Normal => {}
            Behavior::Fail(message) => {
                return Err(UpstreamError::request(self.service, message).into())
            }
            Behavior::Hang => std::future::pending::<()>().await,
            Behavior::Delay(d) => tokio::time::sleep(*d).await,
        }

        match self.values.get(key) {
            Some(value) => Ok(value.clone().map(Zeroizing::new)),
            None => Err(UpstreamError::request(
                self.service,
                format!("ResourceNotFoundException: {}", key),
            )
            .into()),
        }
    }
}

/// Fake Secrets Manager.
pub struct FakeSecretStore(Table);

impl FakeSecretStore {
    pub fn new() -> Self {
        Self(Table::new(Service::SecretsManager))
    }

    pub fn with(mut self, id: &str, value: &str) -> Self {
        self.0.values.insert(id.to_string(), Some(value.to_string()));
        self
    }

    /// A secret that exists but has no string payload.
    pub fn with_binary(mut self, id: &str) -> Self {
        self.0.values.insert(id.to_string(), None);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.0.behavior = Behavior::Fail(message.to_string());
        self
    }

    pub fn hanging(mut self) -> Self {
        self.0.behavior = Behavior::Hang;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.0.behavior = Behavior::Delay(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }

    /// Identifiers looked up, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.0.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<Option<Zeroizing<String>>> {
        self.0.get(secret_id).await
    }
}

/// Fake SSM Parameter Store.
pub struct FakeParameterStore(Table);

impl FakeParameterStore {
    pub fn new() -> Self {
        Self(Table::new(Service::ParameterStore))
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.values.insert(name.to_string(), Some(value.to_string()));
        self
    }

    /// A parameter whose response carries no value.
    pub fn with_empty(mut self, name: &str) -> Self {
        self.0.values.insert(name.to_string(), None);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.0.behavior = Behavior::Fail(message.to_string());
        self
    }

    pub fn hanging(mut self) -> Self {
        self.0.behavior = Behavior::Hang;
        self
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.0.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParameterStore for FakeParameterStore {
    async fn decrypted_parameter(&self, name: &str) -> Result<Option<Zeroizing<String>>> {
        self.0.get(name).await
    }
}

/// Fake GitHub holding a real key pair.
///
/// Stored secrets are kept as received; [`FakeGitHub::plaintext`] opens
/// them the way GitHub would.
pub struct FakeGitHub {
    secret_key: SecretKey,
    key_id: String,
    advertised_key: Option<String>,
    fail_with: Option<u16>,
    fail_puts_with: Option<u16>,
    secrets: Mutex<HashMap<(String, String), EncryptedSecret>>,
    key_calls: AtomicUsize,
    put_calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn new(key_id: &str) -> Self {
        Self {
            secret_key: SecretKey::generate(&mut OsRng),
            key_id: key_id.to_string(),
            advertised_key: None,
            fail_with: None,
            fail_puts_with: None,
            secrets: Mutex::new(HashMap::new()),
            key_calls: AtomicUsize::new(0),
            put_calls: AtomicUsize::new(0),
        }
    }

    /// Advertise `key` (base64) instead of the real public key.
    pub fn advertising(mut self, key: &str) -> Self {
        self.advertised_key = Some(key.to_string());
        self
    }

    /// Answer every call with this HTTP status.
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    /// Serve the key but answer secret writes with this HTTP status.
    pub fn failing_puts(mut self, status: u16) -> Self {
        self.fail_puts_with = Some(status);
        self
    }

    pub fn public_key_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.secret_key.public_key().as_bytes())
    }

    pub fn key_calls(&self) -> usize {
        self.key_calls.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, repo: &Repository, name: &str) -> Option<EncryptedSecret> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(repo.to_string(), name.to_string()))
            .cloned()
    }

    /// Decrypt a stored secret with the private key.
    pub fn plaintext(&self, repo: &Repository, name: &str) -> Option<String> {
        let secret = self.stored(repo, name)?;
        let sealed = base64::engine::general_purpose::STANDARD
            .decode(secret.encrypted_value)
            .expect("stored value is not base64");
        let opened = self
            .secret_key
            .unseal(&sealed)
            .expect("stored value does not open with the repository key");
        Some(String::from_utf8(opened).expect("plaintext is not utf-8"))
    }

    /// Number of distinct secrets stored.
    pub fn secret_count(&self) -> usize {
        self.secrets.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        Self::fail(self.fail_with)
    }

    fn fail(status: Option<u16>) -> Result<()> {
        match status {
            Some(status) => Err(UpstreamError::Status {
                service: Service::GitHub,
                status,
                message: "fake failure".to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn repository_public_key(&self, _repo: &Repository) -> Result<RepositoryPublicKey> {
        self.key_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(RepositoryPublicKey {
            key_id: self.key_id.clone(),
            key: self
                .advertised_key
                .clone()
                .unwrap_or_else(|| self.public_key_base64()),
        })
    }

    async fn put_repository_secret(
        &self,
        repo: &Repository,
        secret: &EncryptedSecret,
    ) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Self::fail(self.fail_puts_with)?;
        self.secrets
            .lock()
            .unwrap()
            .insert((repo.to_string(), secret.name.clone()), secret.clone());
        Ok(())
    }
}

/// Hands out the shared [`FakeGitHub`] and records the tokens it was given.
pub struct FakeFactory {
    github: Arc<FakeGitHub>,
    tokens: Mutex<Vec<String>>,
    reject: bool,
}

impl FakeFactory {
    pub fn new(github: Arc<FakeGitHub>) -> Self {
        Self {
            github,
            tokens: Mutex::new(Vec::new()),
            reject: false,
        }
    }

    /// Refuse to build clients, as with an unusable token.
    pub fn rejecting(github: Arc<FakeGitHub>) -> Self {
        Self {
            reject: true,
            ..Self::new(github)
        }
    }

    pub fn connects(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

impl ClientFactory for FakeFactory {
    fn connect(&self, token: Zeroizing<String>) -> Result<Arc<dyn GitHubApi>> {
        self.tokens.lock().unwrap().push(token.to_string());
        if self.reject {
            return Err(ConfigError::ClientBuild("token rejected".to_string()).into());
        }
        Ok(self.github.clone())
    }
}
