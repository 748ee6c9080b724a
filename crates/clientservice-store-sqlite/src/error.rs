//! Error type for `clientservice-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A stored document no longer satisfies the client invariants.
  #[error("core error: {0}")]
  Core(#[from] clientservice_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The `id` column and the id inside the document disagree.
  #[error("document {0} is stored under a different id")]
  IdMismatch(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
