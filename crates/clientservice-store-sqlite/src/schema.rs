//! SQL schema for the client SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for later migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per client. The document column holds the complete client as
-- compact wire JSON, including its id.
CREATE TABLE IF NOT EXISTS clients (
    id          TEXT PRIMARY KEY,   -- 24 lowercase hex digits
    client_type TEXT NOT NULL,      -- 'PERSON' | 'COMPANY'
    document    TEXT NOT NULL,
    created_at  TEXT NOT NULL,      -- RFC 3339 UTC
    updated_at  TEXT NOT NULL       -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS clients_type_idx ON clients(client_type);

PRAGMA user_version = 1;
";
