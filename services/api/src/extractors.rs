//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use jobtrack_types::Login;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated subject extracted from the request.
///
/// Extraction runs the full authorization chain: ledger membership,
/// signature verification, and expiry. Handlers taking this parameter
/// never see an unauthenticated request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub login: Login,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = extract_bearer(&parts.headers)?;
        let login = app_state.flow.authorize(&token).await?;

        Ok(AuthUser { login })
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingBearer)?;

    let auth_str = auth_header.to_str().map_err(|_| ApiError::MissingBearer)?;

    auth_str
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .map(String::from)
        .ok_or(ApiError::MissingBearer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer(&headers).unwrap(), "abc");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(extract_bearer(&headers).is_err());
    }
}
