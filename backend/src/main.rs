//! Backend entry-point: wires the complaint endpoints, session middleware,
//! and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::auth::AdminCapability;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryComplaintStore;
use credentials::SecretCode;
use ortho_config::OrthoConfig;
use server::{ServerConfig, Settings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let key = load_session_key(&settings)?;
    let admin = admin_capability(&settings)?;

    let http_state = web::Data::new(HttpState::new(
        Arc::new(InMemoryComplaintStore::default()),
        admin,
    ));
    let health_state = web::Data::new(HealthState::new());

    let config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr(),
    );
    create_server(health_state, http_state, config)?.await
}

/// Minimum bytes of key material accepted for session key derivation.
///
/// `Key::derive_from` panics below this threshold, so the length is checked
/// up front and reported as a startup error instead.
const MIN_SESSION_KEY_BYTES: usize = 32;

/// Load the session key material, falling back to an ephemeral key where
/// allowed.
fn load_session_key(settings: &Settings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match read_key_material(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to load session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}

fn read_key_material(path: &std::path::Path) -> std::io::Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    if bytes.len() < MIN_SESSION_KEY_BYTES {
        return Err(std::io::Error::other(format!(
            "session key must be at least {MIN_SESSION_KEY_BYTES} bytes, found {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Build the admin capability from the configured token.
///
/// There is no fallback: without a token the admin endpoints cannot be
/// served, so startup fails instead of running a half-configured server.
fn admin_capability(settings: &Settings) -> std::io::Result<AdminCapability> {
    let token = settings
        .admin_token
        .as_deref()
        .ok_or_else(|| std::io::Error::other("GRUMBLE_ADMIN_TOKEN must be set"))?;
    let code = SecretCode::new(token)
        .map_err(|e| std::io::Error::other(format!("admin token rejected: {e}")))?;
    Ok(AdminCapability::new(code))
}
