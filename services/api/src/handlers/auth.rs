//! Authentication handlers (login, callback, logout, me)

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};

use jobtrack_db::UserRepository;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{extract_bearer, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    /// Where to send the caller after a completed login
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub bearer_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub login: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

/// GET /login
///
/// Start a login attempt: issue a state token and redirect the caller
/// to the identity provider's authorization page.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> ApiResult<Redirect> {
    let request_url = params.redirect.as_deref().unwrap_or("/");
    let authorize_url = state.flow.login(request_url).await?;

    Ok(Redirect::temporary(&authorize_url))
}

/// GET|POST /callback
///
/// Complete a login attempt. The provider sends the caller back here
/// with the code and the opaque state we issued.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Json<CallbackResponse>> {
    let bearer_token = state.flow.callback(&params.state, &params.code).await?;

    Ok(Json(CallbackResponse { bearer_token }))
}

/// POST /logout
///
/// Revoke the presented session. No authentication required beyond the
/// bearer token itself; revoking an unknown token still succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<LogoutResponse>> {
    let token = extract_bearer(&headers)?;
    state.flow.logout(&token).await?;

    Ok(Json(LogoutResponse { success: true }))
}

/// GET /me
///
/// Profile of the authenticated subject
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<MeResponse>> {
    let user = state
        .repos
        .users
        .find_by_login(auth_user.login.as_str())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(MeResponse {
        login: user.login,
        avatar_url: user.avatar_url,
        created_at: user.created_at.to_rfc3339(),
    }))
}
