//! Jobtrack Auth Core - Authentication business logic
//!
//! Delegated-identity login via an OAuth 2.0 identity provider, plus
//! issuance and verification of the two signed token classes the server
//! uses: the short-lived anti-forgery state token and the session token
//! presented on subsequent requests.

pub mod codec;
pub mod config;
pub mod error;
pub mod flow;
pub mod provider;
pub mod session;
pub mod state;

pub use codec::{SigningKey, SigningKeyError, TokenCodec, TokenError};
pub use config::AuthConfig;
pub use error::AuthError;
pub use flow::LoginFlow;
pub use provider::{GithubProvider, IdentityProvider, ProviderError};
pub use session::{ledger_key, SessionToken};
pub use state::StateToken;
