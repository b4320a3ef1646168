//! Shared test fixtures: in-memory ledgers and a scripted provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use jobtrack_auth_core::{AuthConfig, IdentityProvider, LoginFlow, ProviderError};
use jobtrack_db::{DbResult, NonceLedger, SessionLedger, UserRepository, UserRow};
use jobtrack_types::{Login, UserProfile};

pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// In-memory nonce ledger. `DashMap::remove` gives the same
/// exactly-once consume semantics as the SQL `DELETE`.
#[derive(Default)]
pub struct MockNonceLedger {
    nonces: DashMap<String, (String, DateTime<Utc>)>,
}

impl MockNonceLedger {
    pub fn len(&self) -> usize {
        self.nonces.len()
    }
}

#[async_trait]
impl NonceLedger for MockNonceLedger {
    async fn register(
        &self,
        nonce: &str,
        request_url: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        self.nonces
            .insert(nonce.to_string(), (request_url.to_string(), expires_at));
        Ok(())
    }

    async fn consume(&self, nonce: &str) -> DbResult<bool> {
        Ok(self.nonces.remove(nonce).is_some())
    }

    async fn delete_expired(&self) -> DbResult<u64> {
        let now = Utc::now();
        let before = self.nonces.len();
        self.nonces.retain(|_, (_, expires_at)| *expires_at > now);
        Ok((before - self.nonces.len()) as u64)
    }
}

/// In-memory session ledger keyed by token hash.
#[derive(Default)]
pub struct MockSessionLedger {
    sessions: DashMap<String, (String, DateTime<Utc>)>,
}

impl MockSessionLedger {
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionLedger for MockSessionLedger {
    async fn register(
        &self,
        token_hash: &str,
        login: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        self.sessions
            .insert(token_hash.to_string(), (login.to_string(), expires_at));
        Ok(())
    }

    async fn is_active(&self, token_hash: &str) -> DbResult<bool> {
        Ok(self
            .sessions
            .get(token_hash)
            .map(|entry| entry.1 > Utc::now())
            .unwrap_or(false))
    }

    async fn revoke(&self, token_hash: &str) -> DbResult<()> {
        self.sessions.remove(token_hash);
        Ok(())
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct MockUserRepository {
    users: DashMap<String, UserRow>,
}

impl MockUserRepository {
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn upsert(&self, profile: &UserProfile) -> DbResult<UserRow> {
        let now = Utc::now();
        let row = self
            .users
            .entry(profile.login.to_string())
            .and_modify(|row| {
                row.avatar_url = profile.avatar_url.clone();
                row.updated_at = now;
            })
            .or_insert_with(|| UserRow {
                id: Uuid::new_v4(),
                login: profile.login.to_string(),
                avatar_url: profile.avatar_url.clone(),
                created_at: now,
                updated_at: now,
            })
            .value()
            .clone();
        Ok(row)
    }

    async fn find_by_login(&self, login: &str) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(login).map(|entry| entry.value().clone()))
    }
}

/// Scripted identity provider. Succeeds with a fixed profile unless told
/// to fail, and counts exchange attempts.
pub struct MockProvider {
    login: Login,
    fail_exchange: AtomicBool,
    exchanges: AtomicUsize,
}

impl MockProvider {
    pub fn new(login: impl Into<Login>) -> Self {
        Self {
            login: login.into(),
            fail_exchange: AtomicBool::new(false),
            exchanges: AtomicUsize::new(0),
        }
    }

    pub fn fail_next_exchange(&self) {
        self.fail_exchange.store(true, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://provider.test/authorize?state={state}")
    }

    async fn exchange(&self, _code: &str) -> Result<UserProfile, ProviderError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if self.fail_exchange.swap(false, Ordering::SeqCst) {
            return Err(ProviderError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        Ok(UserProfile {
            login: self.login.clone(),
            avatar_url: Some(format!("https://avatars.test/{}", self.login)),
        })
    }
}

pub type TestFlow = LoginFlow<MockProvider, MockNonceLedger, MockSessionLedger, MockUserRepository>;

pub struct TestHarness {
    pub flow: TestFlow,
    pub nonces: Arc<MockNonceLedger>,
    pub sessions: Arc<MockSessionLedger>,
    pub users: Arc<MockUserRepository>,
}

/// Build a flow over fresh in-memory ledgers.
pub fn harness_with(config: AuthConfig, provider: MockProvider) -> TestHarness {
    let nonces = Arc::new(MockNonceLedger::default());
    let sessions = Arc::new(MockSessionLedger::default());
    let users = Arc::new(MockUserRepository::default());

    let flow = LoginFlow::new(
        config,
        provider,
        Arc::clone(&nonces),
        Arc::clone(&sessions),
        Arc::clone(&users),
    );

    TestHarness {
        flow,
        nonces,
        sessions,
        users,
    }
}

pub fn harness() -> TestHarness {
    harness_with(
        AuthConfig::try_new(TEST_SECRET).unwrap(),
        MockProvider::new("octocat"),
    )
}

/// Pull the state parameter back out of the authorize URL.
pub fn state_from_authorize_url(url: &str) -> String {
    url.split("state=")
        .nth(1)
        .expect("authorize URL carries state")
        .to_string()
}
