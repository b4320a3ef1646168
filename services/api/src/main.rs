//! Jobtrack API
//!
//! Job application tracker with GitHub-delegated login. Callers
//! authenticate once via OAuth and present the returned bearer token on
//! every protected request.

use axum::routing::{get, post, put};
use axum::Router;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use jobtrack_auth_core::{GithubProvider, LoginFlow};
use jobtrack_db::{create_pool, Repositories};

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Jobtrack API");

    let config = Config::from_env()?;

    // Database
    let pool = create_pool(&config.database_url).await?;
    let repos = Repositories::new(pool.clone());

    // Login flow over the GitHub provider and Postgres ledgers
    let provider = GithubProvider::new(
        config.github.client_id.clone(),
        config.github.client_secret.clone(),
        config.github.redirect_url.clone(),
    )?;
    let flow = LoginFlow::new(
        config.auth.clone(),
        provider,
        repos.nonces.clone(),
        repos.sessions.clone(),
        repos.users.clone(),
    );

    let http_port = config.http_port;
    let app_state = AppState::new(flow, repos, pool, config);

    // Sweep expired nonces in the background; abandoned login attempts
    // otherwise accumulate until their rows are never looked at again.
    spawn_nonce_janitor(app_state.repos.nonces.clone());

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/login", get(handlers::login))
        .route("/callback", get(handlers::callback).post(handlers::callback))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
        .route("/jobs", get(handlers::list_jobs).post(handlers::create_job))
        .route(
            "/jobs/{id}",
            get(handlers::get_job).delete(handlers::delete_job),
        )
        .route("/jobs/{id}/apply", put(handlers::apply_to_job))
        .with_state(app_state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn spawn_nonce_janitor(nonces: std::sync::Arc<jobtrack_db::pg::PgNonceLedger>) {
    use jobtrack_db::NonceLedger;

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match nonces.delete_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(deleted = n, "swept expired login nonces"),
                Err(e) => tracing::warn!("nonce sweep failed: {}", e),
            }
        }
    });
}
