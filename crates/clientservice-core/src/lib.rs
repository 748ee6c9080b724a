//! Core types and trait definitions for the client service.
//!
//! This crate has no HTTP or database dependencies. It owns the immutable
//! [`Client`] model, its builders, the tree deserializer that rebuilds a
//! client from wire JSON, and the [`store::ClientStore`] abstraction
//! implemented by storage backends.

pub mod address;
pub mod client;
pub mod enums;
pub mod error;
pub mod object_id;
pub mod postal;
pub mod store;
pub mod wire;

mod de;

pub use address::{Address, AddressBuilder};
pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use object_id::ObjectId;
pub use postal::PostalAddress;
