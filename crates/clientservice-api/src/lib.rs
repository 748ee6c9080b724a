//! HTTP layer for the client service.
//!
//! Exposes an axum [`Router`] serving the `/clients` resource and the OAuth2
//! token endpoint, backed by any [`ClientStore`].

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use clientservice_core::store::ClientStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, Scope, TokenStore};
use handlers::{clients, token};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLIENTSERVICE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                     String,
  pub port:                     u16,
  pub store_path:               PathBuf,
  pub oauth_client_id:          String,
  /// argon2 PHC string of the client secret.
  pub oauth_client_secret_hash: String,
  #[serde(default = "Scope::all")]
  pub oauth_scopes:             Vec<Scope>,
  #[serde(default = "default_token_ttl")]
  pub token_ttl_secs:           u64,
}

fn default_token_ttl() -> u64 { 3600 }

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ClientStore> {
  pub store:  Arc<S>,
  pub auth:   Arc<AuthConfig>,
  pub tokens: Arc<TokenStore>,
}

impl<S: ClientStore> AppState<S> {
  /// Wire up the store with the OAuth client and token lifetime from
  /// `config`.
  pub fn new(store: S, config: &ServerConfig) -> Self {
    let auth = AuthConfig {
      client_id:          config.oauth_client_id.clone(),
      client_secret_hash: config.oauth_client_secret_hash.clone(),
      scopes:             config.oauth_scopes.clone(),
    };
    Self {
      store:  Arc::new(store),
      tokens: Arc::new(TokenStore::new(config.token_ttl_secs)),
      auth:   Arc::new(auth),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ClientStore + Clone + 'static,
{
  Router::new()
    .route("/clients",      get(clients::list::<S>).post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .put(clients::replace::<S>)
        .delete(clients::delete::<S>),
    )
    .route("/oauth/token",  post(token::issue::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
