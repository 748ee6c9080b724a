//! `server`: the client service REST binary.
//!
//! Settings come from an optional TOML file overlaid with `CLIENTSERVICE_*`
//! environment variables (`CLIENTSERVICE_PORT=9000`,
//! `CLIENTSERVICE_OAUTH_SCOPES="read write"`, ...). Any key left unset falls
//! back to the defaults in [`load_config`].
//!
//! ```text
//! server --config /etc/clientservice.toml
//! echo -n 'clientSecret' | server --hash-secret
//! ```

use std::{
  ffi::OsString,
  io::BufRead,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use clientservice_api::{AppState, ServerConfig};
use clientservice_store_sqlite::SqliteStore;
use config::{Config, Environment, File};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Client service REST server")]
struct Cli {
  /// TOML settings file; missing is fine.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Hash the client secret read from stdin for `oauth_client_secret_hash`,
  /// print it, and exit.
  #[arg(long)]
  hash_secret: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  if cli.hash_secret {
    let hash = hash_secret(std::io::stdin().lock())?;
    println!("{hash}");
    return Ok(());
  }

  init_tracing();

  let settings = load_config(&cli.config)?;
  let store_path = resolve_store_path(&settings.store_path, std::env::var_os("HOME"));
  if let Some(dir) = store_path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("creating store directory {}", dir.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("opening client store {}", store_path.display()))?;
  info!(path = %store_path.display(), "client store ready");

  let listener = TcpListener::bind((settings.host.as_str(), settings.port))
    .await
    .with_context(|| format!("binding {}:{}", settings.host, settings.port))?;
  info!(addr = %listener.local_addr()?, "serving clients");

  let app = clientservice_api::router(AppState::new(store, &settings));
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      // An error here means no signal handler; keep serving until killed.
      if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
      }
      info!("shutting down");
    })
    .await
    .context("http server")
}

fn init_tracing() {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Layer defaults, the TOML file at `path` and the environment, in that
/// order of increasing precedence.
fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "~/.local/share/clientservice/clients.db")?
    .add_source(File::from(path).required(false))
    .add_source(
      Environment::with_prefix("CLIENTSERVICE")
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("oauth_scopes"),
    )
    .build()
    .with_context(|| format!("reading settings from {}", path.display()))?
    .try_deserialize()
    .context("invalid server settings")
}

/// argon2 PHC string for the first line of `input`.
fn hash_secret(mut input: impl BufRead) -> anyhow::Result<String> {
  let mut line = String::new();
  input.read_line(&mut line).context("reading secret from stdin")?;
  let secret = line.trim_end_matches(['\n', '\r']);
  anyhow::ensure!(!secret.is_empty(), "empty client secret");

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))
}

/// Replace a leading `~` component with `home`, when one is known.
fn resolve_store_path(path: &Path, home: Option<OsString>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHash, PasswordVerifier};
  use clientservice_api::auth::Scope;

  use super::*;

  #[test]
  fn store_path_under_home() {
    let home = Some(OsString::from("/home/ken"));
    assert_eq!(
      resolve_store_path(Path::new("~/data/clients.db"), home.clone()),
      PathBuf::from("/home/ken/data/clients.db")
    );
    assert_eq!(
      resolve_store_path(Path::new("/var/lib/clients.db"), home),
      PathBuf::from("/var/lib/clients.db")
    );
    assert_eq!(
      resolve_store_path(Path::new("~/clients.db"), None),
      PathBuf::from("~/clients.db")
    );
  }

  #[test]
  fn hashed_secret_verifies() {
    let hash = hash_secret("clientSecret\n".as_bytes()).unwrap();
    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(Argon2::default().verify_password(b"clientSecret", &parsed).is_ok());
    assert!(hash_secret("\n".as_bytes()).is_err());
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("clientservice-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "port = 9000\n\
       oauth_client_id = \"clientId\"\n\
       oauth_client_secret_hash = \"$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA\"\n\
       oauth_scopes = [\"read\"]\n",
    )
    .unwrap();

    let settings = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(settings.host, "127.0.0.1");
    assert_eq!(settings.port, 9000);
    assert_eq!(settings.oauth_client_id, "clientId");
    assert_eq!(settings.oauth_scopes, vec![Scope::Read]);
    assert_eq!(settings.token_ttl_secs, 3600);
  }
}
