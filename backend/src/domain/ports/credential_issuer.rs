//! Driven port for minting identifiers and login credentials.
//!
//! The store asks this port for fresh user ids, complaint ids, and secret
//! codes so generation stays substitutable in tests: a mock issuer can
//! replay colliding values to exercise the store's retry paths
//! deterministically.

use credentials::SecretCode;

use crate::domain::{ComplaintId, UserId};

/// Source of freshly minted identifiers and secret codes.
///
/// Uniqueness is not guaranteed here; the store checks every candidate
/// against values already in use and asks again on collision.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialIssuer: Send + Sync {
    /// Mint a candidate user identifier.
    fn user_id(&self) -> UserId;

    /// Mint a candidate complaint identifier.
    fn complaint_id(&self) -> ComplaintId;

    /// Mint a candidate secret code.
    fn secret_code(&self) -> SecretCode;
}

/// Production issuer drawing identifiers from UUID v4 generation and secret
/// codes from the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCredentialIssuer;

impl CredentialIssuer for RandomCredentialIssuer {
    fn user_id(&self) -> UserId {
        UserId::random()
    }

    fn complaint_id(&self) -> ComplaintId {
        ComplaintId::random()
    }

    fn secret_code(&self) -> SecretCode {
        SecretCode::generate()
    }
}
