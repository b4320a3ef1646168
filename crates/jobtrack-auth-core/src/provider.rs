//! Identity provider contract and the GitHub implementation
//!
//! The login flow only ever sees the [`IdentityProvider`] trait: build
//! an authorization URL, and exchange a callback code for a profile.
//! Tests substitute a mock; production uses [`GithubProvider`].

use async_trait::async_trait;
use jobtrack_types::{Login, UserProfile};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

/// Identity provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request failed at the transport level
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),
}

/// OAuth 2.0 authorization-code identity provider.
///
/// Opaque beyond this contract: the flow hands over a code and gets back
/// the subject's profile, or an error.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization endpoint URL carrying the opaque state parameter
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange a callback code for the authenticated subject's profile
    async fn exchange(&self, code: &str) -> Result<UserProfile, ProviderError>;
}

/// GitHub OAuth 2.0 provider
#[derive(Clone)]
pub struct GithubProvider {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct GithubUser {
    login: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl GithubProvider {
    /// Create a provider with the registered OAuth app credentials.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed; treat
    /// that as a startup failure.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .user_agent("jobtrack")
            .build()?;

        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            http,
        })
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = Url::parse(GITHUB_AUTHORIZE_URL).expect("constant URL parses");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange(&self, code: &str) -> Result<UserProfile, ProviderError> {
        // Code -> access token
        let response = self
            .http
            .post(GITHUB_TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_url.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }
        let token: AccessTokenResponse = response.json().await?;

        // Access token -> profile
        let response = self
            .http
            .get(GITHUB_USER_URL)
            .bearer_auth(&token.access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }
        let user: GithubUser = response.json().await?;

        Ok(UserProfile {
            login: Login::new(user.login),
            avatar_url: user.avatar_url,
        })
    }
}

impl std::fmt::Debug for GithubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubProvider")
            .field("client_id", &self.client_id)
            .field("redirect_url", &self.redirect_url)
            .finish_non_exhaustive()
    }
}
