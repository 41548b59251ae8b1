//! Server runtime settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Configuration values controlling server startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GRUMBLE")]
pub struct Settings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Mark session cookies `Secure` so browsers only send them over TLS.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// File holding the session key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Static administrator bearer token accepted by the admin endpoints.
    pub admin_token: Option<String>,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the configured session key path, falling back to the default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}
