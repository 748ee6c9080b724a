//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant renders as `{"error": "<message>"}` with its mapped status.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing, unknown or expired bearer token.
  #[error("unauthorized")]
  Unauthorized,

  /// Bad client credentials at the token endpoint.
  #[error("invalid_client")]
  InvalidClient,

  /// A valid token without a scope the route requires.
  #[error("insufficient_scope")]
  Forbidden,

  /// An OAuth2 error code from the token endpoint, e.g. `invalid_scope`.
  #[error("{0}")]
  OAuth(&'static str),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  /// The request body could not be turned into a client.
  #[error("{0}")]
  Client(#[from] clientservice_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthorized | ApiError::InvalidClient => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::OAuth(_) | ApiError::BadRequest(_) | ApiError::Client(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let challenge = match self {
      ApiError::Unauthorized => Some("Bearer"),
      ApiError::InvalidClient => Some("Basic realm=\"oauth\""),
      _ => None,
    };

    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if let Some(challenge) = challenge {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
    }
    res
  }
}
