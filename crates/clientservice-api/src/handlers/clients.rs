//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path            | Scope               | Notes |
//! |----------|-----------------|---------------------|-------|
//! | `GET`    | `/clients`      | any                 | 204 when there are no clients |
//! | `GET`    | `/clients/{id}` | any                 | 404 if not found |
//! | `POST`   | `/clients`      | `write\|read-write` | 201 + `Location`; 400 if the id is taken |
//! | `PUT`    | `/clients/{id}` | `write\|read-write` | 204; 400 if the id is unknown |
//! | `DELETE` | `/clients/{id}` | `write\|read-write` | 204, idempotent |

use axum::{
  extract::{Path, State},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use clientservice_core::{Client, store::ClientStore, wire};
use tracing::{debug, info};

use crate::{
  AppState,
  auth::{Granted, Scope},
  error::ApiError,
  handlers::{Pretty, parse_id},
};

pub const ALREADY_EXISTS: &str =
  "Client already exists, to update an existing client use PUT instead.";
pub const DOES_NOT_EXIST: &str =
  "Client does not exist, to create a new client use POST instead.";

// ─── Reads ───────────────────────────────────────────────────────────────────

/// `GET /clients`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  granted: Granted,
) -> Result<Response, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  granted.require(Scope::READ)?;

  let clients = state
    .store
    .find_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  debug!(count = clients.len(), "listing clients");
  if clients.is_empty() {
    return Ok(StatusCode::NO_CONTENT.into_response());
  }
  Ok(Pretty(clients).into_response())
}

/// `GET /clients/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  granted: Granted,
  Path(raw_id): Path<String>,
) -> Result<Response, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  granted.require(Scope::READ)?;
  let id = parse_id(&raw_id)?;

  let client = state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;

  Ok(Pretty(client).into_response())
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// `POST /clients`
///
/// A body without an id gets one assigned by the store. A body whose id is
/// already stored is rejected; updates go through `PUT`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  granted: Granted,
  body: Bytes,
) -> Result<Response, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  granted.require(Scope::WRITE)?;
  let client = wire::from_slice(&body)?;

  if let Some(id) = client.id()
    && state
      .store
      .exists_by_id(id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
  {
    return Err(ApiError::BadRequest(ALREADY_EXISTS.to_string()));
  }

  let saved = state
    .store
    .save(client)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let id = saved
    .id()
    .ok_or_else(|| ApiError::Internal("stored client has no id".to_string()))?;

  info!(%id, "client created");
  let location = HeaderValue::from_str(&format!("/clients/{id}"))
    .map_err(|e| ApiError::Internal(e.to_string()))?;
  Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// `PUT /clients/{id}`
///
/// Replaces the whole document. The path id wins over any id in the body.
pub async fn replace<S>(
  State(state): State<AppState<S>>,
  granted: Granted,
  Path(raw_id): Path<String>,
  body: Bytes,
) -> Result<Response, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  granted.require(Scope::WRITE)?;
  let id = parse_id(&raw_id)?;
  let client = wire::from_slice(&body)?;

  let exists = state
    .store
    .exists_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !exists {
    return Err(ApiError::BadRequest(DOES_NOT_EXIST.to_string()));
  }

  let client = Client::from_existing(&client).with_id(id).build();
  state
    .store
    .save(client)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  info!(%id, "client replaced");
  Ok(StatusCode::NO_CONTENT.into_response())
}

/// `DELETE /clients/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  granted: Granted,
  Path(raw_id): Path<String>,
) -> Result<Response, ApiError>
where
  S: ClientStore + Clone + 'static,
{
  granted.require(Scope::WRITE)?;
  let id = parse_id(&raw_id)?;

  state
    .store
    .delete_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(StatusCode::NO_CONTENT.into_response())
}
