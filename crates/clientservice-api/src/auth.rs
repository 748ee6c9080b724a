//! OAuth2 client-credentials tokens and the bearer-scope gate.
//!
//! One client is configured. It trades its HTTP Basic credentials at
//! `/oauth/token` for a random bearer token that is held in memory until it
//! expires. Resource handlers take a [`Granted`] extractor and then ask it for
//! the scopes the route needs.

use std::collections::HashMap;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::{DateTime, Duration, Utc};
use clientservice_core::store::ClientStore;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tokio::sync::RwLock;
use tracing::warn;

use crate::{AppState, error::ApiError};

// ─── Scopes ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Scope {
  Read,
  Write,
  ReadWrite,
}

impl Scope {
  /// Scopes that allow reading clients.
  pub const READ: &'static [Scope] = &[Scope::Read, Scope::Write, Scope::ReadWrite];
  /// Scopes that allow changing clients.
  pub const WRITE: &'static [Scope] = &[Scope::Write, Scope::ReadWrite];

  pub fn all() -> Vec<Scope> { vec![Scope::Read, Scope::Write, Scope::ReadWrite] }
}

/// Space-separated scope list, as used on the wire.
pub fn join_scopes(scopes: &[Scope]) -> String {
  scopes
    .iter()
    .map(Scope::as_ref)
    .collect::<Vec<_>>()
    .join(" ")
}

// ─── Client credentials ──────────────────────────────────────────────────────

/// The OAuth client accepted by this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub client_id:          String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub client_secret_hash: String,
  pub scopes:             Vec<Scope>,
}

impl AuthConfig {
  /// Resolve a requested space-separated scope list against the scopes this
  /// client may hold. No request means every allowed scope.
  pub fn grant(&self, requested: Option<&str>) -> Result<Vec<Scope>, ApiError> {
    let Some(requested) = requested.filter(|r| !r.trim().is_empty()) else {
      return Ok(self.scopes.clone());
    };

    let mut granted = Vec::new();
    for name in requested.split_whitespace() {
      let scope: Scope = name.parse().map_err(|_| ApiError::OAuth("invalid_scope"))?;
      if !self.scopes.contains(&scope) {
        return Err(ApiError::OAuth("invalid_scope"));
      }
      if !granted.contains(&scope) {
        granted.push(scope);
      }
    }
    Ok(granted)
  }
}

/// Verify HTTP Basic client credentials against `config`.
pub fn verify_client(headers: &HeaderMap, config: &AuthConfig) -> Result<(), ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::InvalidClient)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::InvalidClient)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::InvalidClient)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::InvalidClient)?;

  let (client_id, secret) = creds.split_once(':').ok_or(ApiError::InvalidClient)?;

  if client_id != config.client_id {
    warn!(client_id, "unknown oauth client");
    return Err(ApiError::InvalidClient);
  }

  let parsed_hash = PasswordHash::new(&config.client_secret_hash)
    .map_err(|_| ApiError::InvalidClient)?;

  Argon2::default()
    .verify_password(secret.as_bytes(), &parsed_hash)
    .map_err(|_| {
      warn!(client_id, "bad oauth client secret");
      ApiError::InvalidClient
    })?;

  Ok(())
}

// ─── Token store ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct IssuedToken {
  scopes:     Vec<Scope>,
  expires_at: DateTime<Utc>,
}

/// In-memory bearer tokens with a fixed lifetime.
pub struct TokenStore {
  tokens: RwLock<HashMap<String, IssuedToken>>,
  ttl:    Duration,
}

impl TokenStore {
  pub fn new(ttl_secs: u64) -> Self {
    let ttl = i64::try_from(ttl_secs)
      .ok()
      .and_then(Duration::try_seconds)
      .unwrap_or(Duration::MAX);
    Self {
      tokens: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  /// Lifetime of a freshly issued token, in seconds.
  pub fn ttl_secs(&self) -> i64 { self.ttl.num_seconds() }

  /// Issue a new token carrying `scopes`. Expired tokens are dropped first.
  pub async fn issue(&self, scopes: Vec<Scope>) -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    let now        = Utc::now();
    let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut tokens = self.tokens.write().await;
    tokens.retain(|_, t| t.expires_at > now);
    tokens.insert(token.clone(), IssuedToken { scopes, expires_at });
    token
  }

  /// Scopes of a live token, or `None` when it is unknown or expired.
  pub async fn scopes(&self, token: &str) -> Option<Vec<Scope>> {
    let tokens = self.tokens.read().await;
    tokens
      .get(token)
      .filter(|t| t.expires_at > Utc::now())
      .map(|t| t.scopes.clone())
  }
}

// ─── Bearer extractor ────────────────────────────────────────────────────────

/// Present in a handler means the request carried a live bearer token.
#[derive(Debug)]
pub struct Granted {
  pub scopes: Vec<Scope>,
}

impl Granted {
  /// Succeed when the token holds at least one of `any_of`.
  pub fn require(&self, any_of: &[Scope]) -> Result<(), ApiError> {
    if self.scopes.iter().any(|s| any_of.contains(s)) {
      Ok(())
    } else {
      warn!(scopes = %join_scopes(&self.scopes), "insufficient scope");
      Err(ApiError::Forbidden)
    }
  }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
}

impl<S> FromRequestParts<AppState<S>> for Granted
where
  S: ClientStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
    match state.tokens.scopes(token).await {
      Some(scopes) => Ok(Granted { scopes }),
      None => {
        warn!("rejected bearer token");
        Err(ApiError::Unauthorized)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::HeaderValue;

  use super::*;

  fn config(secret: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(secret.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AuthConfig {
      client_id:          "clientId".to_string(),
      client_secret_hash: hash,
      scopes:             Scope::all(),
    }
  }

  fn basic(id: &str, secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", B64.encode(format!("{id}:{secret}")));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    headers
  }

  #[test]
  fn scope_names() {
    assert_eq!(Scope::ReadWrite.as_ref(), "read-write");
    assert_eq!("read".parse::<Scope>().unwrap(), Scope::Read);
    assert!("admin".parse::<Scope>().is_err());
    assert_eq!(join_scopes(&Scope::all()), "read write read-write");
  }

  #[test]
  fn correct_client_credentials() {
    let cfg = config("clientSecret");
    assert!(verify_client(&basic("clientId", "clientSecret"), &cfg).is_ok());
  }

  #[test]
  fn wrong_secret_or_client_is_rejected() {
    let cfg = config("clientSecret");
    assert!(matches!(
      verify_client(&basic("clientId", "wrong"), &cfg),
      Err(ApiError::InvalidClient)
    ));
    assert!(matches!(
      verify_client(&basic("other", "clientSecret"), &cfg),
      Err(ApiError::InvalidClient)
    ));
    assert!(matches!(
      verify_client(&HeaderMap::new(), &cfg),
      Err(ApiError::InvalidClient)
    ));
  }

  #[test]
  fn grant_defaults_to_every_allowed_scope() {
    let cfg = config("s");
    assert_eq!(cfg.grant(None).unwrap(), Scope::all());
    assert_eq!(cfg.grant(Some("  ")).unwrap(), Scope::all());
  }

  #[test]
  fn grant_narrows_to_requested_scopes() {
    let cfg = config("s");
    assert_eq!(cfg.grant(Some("read read")).unwrap(), vec![Scope::Read]);
    assert_eq!(
      cfg.grant(Some("write read-write")).unwrap(),
      vec![Scope::Write, Scope::ReadWrite]
    );
  }

  #[test]
  fn grant_rejects_unknown_or_disallowed_scopes() {
    let mut cfg = config("s");
    assert!(matches!(cfg.grant(Some("admin")), Err(ApiError::OAuth("invalid_scope"))));

    cfg.scopes = vec![Scope::Read];
    assert!(matches!(cfg.grant(Some("write")), Err(ApiError::OAuth("invalid_scope"))));
  }

  #[test]
  fn require_checks_any_of() {
    let reader = Granted { scopes: vec![Scope::Read] };
    assert!(reader.require(Scope::READ).is_ok());
    assert!(matches!(reader.require(Scope::WRITE), Err(ApiError::Forbidden)));

    let writer = Granted { scopes: vec![Scope::ReadWrite] };
    assert!(writer.require(Scope::READ).is_ok());
    assert!(writer.require(Scope::WRITE).is_ok());
  }

  #[tokio::test]
  async fn issued_tokens_resolve_to_their_scopes() {
    let store = TokenStore::new(3600);
    let token = store.issue(vec![Scope::Write]).await;

    assert_eq!(token.len(), 64);
    assert_eq!(store.scopes(&token).await, Some(vec![Scope::Write]));
    assert_eq!(store.scopes("nope").await, None);
    assert_eq!(store.ttl_secs(), 3600);
  }

  #[tokio::test]
  async fn expired_tokens_are_rejected_and_purged() {
    let store = TokenStore::new(0);
    let stale = store.issue(vec![Scope::Read]).await;
    assert_eq!(store.scopes(&stale).await, None);

    store.issue(vec![Scope::Read]).await;
    assert!(!store.tokens.read().await.contains_key(&stale));
  }

  #[test]
  fn bearer_header_parsing() {
    let mut headers = HeaderMap::new();
    assert_eq!(bearer_token(&headers), None);
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    assert_eq!(bearer_token(&headers), Some("abc"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(bearer_token(&headers), None);
  }
}
