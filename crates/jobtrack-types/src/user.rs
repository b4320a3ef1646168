//! Subject and profile types

use serde::{Deserialize, Serialize};

/// Stable identifier of an authenticated subject.
///
/// This is the identity provider's login name, never an email address.
/// The auth core carries only this value; display attributes live in
/// [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Login(pub String);

impl Login {
    /// Create a login from anything string-like
    pub fn new(login: impl Into<String>) -> Self {
        Self(login.into())
    }

    /// Borrow the login as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Login {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Login {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Profile returned by the identity provider after a code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider login name (the subject identifier)
    pub login: Login,
    /// Avatar image URL, if the provider supplies one
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_display_roundtrip() {
        let login = Login::new("octocat");
        assert_eq!(login.to_string(), "octocat");
        assert_eq!(login.as_str(), "octocat");
    }

    #[test]
    fn test_login_serde_transparent() {
        let login = Login::new("octocat");
        let json = serde_json::to_string(&login).unwrap();
        assert_eq!(json, "\"octocat\"");
        let back: Login = serde_json::from_str(&json).unwrap();
        assert_eq!(back, login);
    }
}
