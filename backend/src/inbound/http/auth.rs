//! Admin authorisation helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! the bearer-token check for admin endpoints here.

use actix_web::HttpRequest;
use actix_web::http::header;
use credentials::{CodeFingerprint, SecretCode};

use crate::domain::Error;

use super::ApiResult;

/// Capability guarding admin-only endpoints.
///
/// Holds only the fingerprint of the configured admin token; the plaintext is
/// dropped once the capability is built, so neither state dumps nor logs can
/// reveal it.
#[derive(Debug, Clone)]
pub struct AdminCapability {
    fingerprint: CodeFingerprint,
}

impl AdminCapability {
    /// Build the capability from the configured admin token.
    #[must_use]
    pub fn new(token: SecretCode) -> Self {
        Self {
            fingerprint: token.fingerprint(),
        }
    }

    /// Authorise a request carrying `Authorization: Bearer <token>`.
    ///
    /// # Errors
    /// Returns `401 Unauthorized` when no bearer token is supplied and
    /// `403 Forbidden` when one is supplied but does not match the
    /// configured token.
    pub fn authorise(&self, req: &HttpRequest) -> ApiResult<()> {
        let Some(candidate) = bearer_token(req) else {
            return Err(Error::unauthorized("admin token required"));
        };
        let Ok(code) = SecretCode::new(candidate) else {
            return Err(Error::forbidden("admin token rejected"));
        };
        if self.fingerprint.matches(&code) {
            Ok(())
        } else {
            Err(Error::forbidden("admin token rejected"))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}
