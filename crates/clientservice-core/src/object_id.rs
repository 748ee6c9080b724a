//! Document identifiers.
//!
//! An [`ObjectId`] is twelve bytes: a big-endian seconds-since-epoch
//! timestamp (4), a per-process random value (5) and a big-endian counter (3)
//! seeded randomly. Its canonical text form is 24 lowercase hex digits.

use std::{
  fmt,
  str::FromStr,
  sync::{
    LazyLock,
    atomic::{AtomicU32, Ordering},
  },
};

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Serialize, Serializer};

use crate::{Error, Result};

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| {
  let mut bytes = [0u8; 5];
  OsRng.fill_bytes(&mut bytes);
  bytes
});

static COUNTER: LazyLock<AtomicU32> =
  LazyLock::new(|| AtomicU32::new(OsRng.next_u32() & 0x00ff_ffff));

/// Identifier assigned to a client when it is first stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
  /// Generate a fresh identifier.
  pub fn new() -> Self {
    let seconds = Utc::now().timestamp() as u32;
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
    bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..]);
    Self(bytes)
  }

  pub fn from_bytes(bytes: [u8; 12]) -> Self { Self(bytes) }

  pub fn bytes(&self) -> [u8; 12] { self.0 }

  /// The creation time embedded in the identifier, to the second.
  pub fn timestamp(&self) -> DateTime<Utc> {
    let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
    DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
  }

  pub fn to_hex(&self) -> String { hex::encode(self.0) }

  /// Parse the 24-hex-digit text form. Either letter case is accepted.
  pub fn parse_str(s: &str) -> Result<Self> {
    if s.len() != 24 {
      return Err(Error::InvalidObjectId(s.to_owned()));
    }
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(s, &mut bytes)
      .map_err(|_| Error::InvalidObjectId(s.to_owned()))?;
    Ok(Self(bytes))
  }
}

impl Default for ObjectId {
  fn default() -> Self { Self::new() }
}

impl FromStr for ObjectId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse_str(s) }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl fmt::Debug for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ObjectId({})", self.to_hex())
  }
}

/// Always rendered as its string form, never as a structured value.
impl Serialize for ObjectId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
