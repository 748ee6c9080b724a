//! `POST /oauth/token`, the client-credentials grant.

use axum::{
  Form, Json,
  extract::State,
  http::HeaderMap,
};
use clientservice_core::store::ClientStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  AppState,
  auth::{join_scopes, verify_client},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
  pub grant_type: Option<String>,
  /// Space-separated; all allowed scopes when absent.
  pub scope:      Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub token_type:   String,
  pub expires_in:   i64,
  pub scope:        String,
}

pub async fn issue<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Form(request): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  verify_client(&headers, &state.auth)?;

  match request.grant_type.as_deref() {
    Some("client_credentials") => {}
    Some(_) => return Err(ApiError::OAuth("unsupported_grant_type")),
    None => return Err(ApiError::OAuth("invalid_request")),
  }

  let scopes = state.auth.grant(request.scope.as_deref())?;
  let scope  = join_scopes(&scopes);
  let access_token = state.tokens.issue(scopes).await;

  info!(client_id = %state.auth.client_id, %scope, "token issued");
  Ok(Json(TokenResponse {
    access_token,
    token_type: "bearer".to_string(),
    expires_in: state.tokens.ttl_secs(),
    scope,
  }))
}
