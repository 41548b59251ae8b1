//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;
use credentials::SecretCode;

use crate::inbound::http::auth::AdminCapability;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryComplaintStore;

/// Admin token accepted by handler tests.
pub const TEST_ADMIN_TOKEN: &str = "t3stAdm1nT0kenF0rHandler";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state backed by an empty in-memory store.
///
/// The admin capability accepts [`TEST_ADMIN_TOKEN`].
pub fn test_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryComplaintStore::default());
    let admin = AdminCapability::new(SecretCode::new(TEST_ADMIN_TOKEN).expect("valid test token"));
    web::Data::new(HttpState::new(store, admin))
}
