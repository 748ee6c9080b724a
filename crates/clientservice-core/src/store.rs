//! The `ClientStore` trait.
//!
//! Implemented by storage backends (e.g. `clientservice-store-sqlite`). The
//! HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{Client, ObjectId};

/// Abstraction over a client document store.
///
/// Clients are stored whole; there are no partial updates. All methods return
/// `Send` futures so the trait can be used behind `axum` on a multi-threaded
/// tokio runtime.
pub trait ClientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `client` and return the stored document.
  ///
  /// A client without an id gets a freshly generated [`ObjectId`]; the
  /// returned client carries it. A client with an id replaces any document
  /// stored under that id, or is inserted if there is none.
  fn save(
    &self,
    client: Client,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Retrieve a client by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: ObjectId,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// All stored clients, ordered by id (and so by creation time).
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  fn exists_by_id(
    &self,
    id: ObjectId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the client stored under `id`. Returns whether anything was
  /// removed; deleting an unknown id is not an error.
  fn delete_by_id(
    &self,
    id: ObjectId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
