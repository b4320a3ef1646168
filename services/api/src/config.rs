//! Configuration for the Jobtrack API service.

use jobtrack_auth_core::AuthConfig;
use std::time::Duration;

/// GitHub OAuth application credentials
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

/// API service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// GitHub OAuth app
    pub github: GithubConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "9090".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Token signing secret (minimum 32 bytes, no default)
        let session_secret =
            std::env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;

        // Token lifetimes (default 24 hours each)
        let state_lifetime_hours: u64 = std::env::var("STATE_LIFETIME_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("STATE_LIFETIME_HOURS"))?;

        let session_lifetime_hours: u64 = std::env::var("SESSION_LIFETIME_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SESSION_LIFETIME_HOURS"))?;

        // GitHub OAuth app
        let github = GithubConfig {
            client_id: std::env::var("GITHUB_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GITHUB_CLIENT_ID"))?,
            client_secret: std::env::var("GITHUB_CLIENT_SECRET")
                .map_err(|_| ConfigError::Missing("GITHUB_CLIENT_SECRET"))?,
            redirect_url: std::env::var("GITHUB_REDIRECT_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}/callback")),
        };

        let auth = AuthConfig::try_new(&session_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_state_lifetime(Duration::from_secs(state_lifetime_hours * 3600))
            .with_session_lifetime(Duration::from_secs(session_lifetime_hours * 3600));

        Ok(Self {
            http_port,
            database_url,
            auth,
            github,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
