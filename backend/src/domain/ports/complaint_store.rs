//! Driving port for complaint management use-cases.
//!
//! Inbound adapters call this port to register users, authenticate secret
//! codes, and manage complaints without knowing the backing infrastructure.
//! HTTP handler tests substitute a mock store instead of wiring state.

use async_trait::async_trait;
use credentials::SecretCode;
use thiserror::Error;

use crate::domain::{Complaint, ComplaintDraft, ComplaintId, RegistrationDraft, User, UserId};

/// Errors surfaced by complaint store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No user exists for the given identifier.
    #[error("no user found for id {user_id}")]
    UserNotFound {
        /// Identifier that failed to resolve.
        user_id: String,
    },
    /// No complaint exists for the given identifier.
    #[error("no complaint found for id {complaint_id}")]
    ComplaintNotFound {
        /// Identifier that failed to resolve.
        complaint_id: String,
    },
    /// No user matches the supplied secret code.
    #[error("no user matches the supplied secret code")]
    CodeNotFound,
    /// The store gave up minting a unique secret code.
    #[error("could not mint a unique secret code after {attempts} attempts")]
    CredentialSpaceExhausted {
        /// Number of generation attempts made before giving up.
        attempts: u32,
    },
}

impl StoreError {
    /// Helper for unknown user identifiers.
    #[must_use]
    pub fn user_not_found(user_id: &UserId) -> Self {
        Self::UserNotFound {
            user_id: user_id.to_string(),
        }
    }

    /// Helper for unknown complaint identifiers.
    #[must_use]
    pub fn complaint_not_found(complaint_id: &ComplaintId) -> Self {
        Self::ComplaintNotFound {
            complaint_id: complaint_id.to_string(),
        }
    }

    /// Helper for exhausted credential generation.
    #[must_use]
    pub fn credential_space_exhausted(attempts: u32) -> Self {
        Self::CredentialSpaceExhausted { attempts }
    }
}

/// Use-case port for registering users and managing their complaints.
///
/// Implementations must make each operation atomic: callers may invoke them
/// concurrently from many request handlers and must never observe a
/// half-applied registration or submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Register a new user, minting a fresh identifier and secret code.
    async fn register(&self, draft: RegistrationDraft) -> Result<User, StoreError>;

    /// Resolve a secret code to the user who owns it.
    ///
    /// Returns a snapshot of the user including their complaint history.
    async fn authenticate(&self, code: &SecretCode) -> Result<User, StoreError>;

    /// Record a new complaint for an existing user.
    async fn submit_complaint(
        &self,
        user_id: &UserId,
        draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError>;

    /// List a user's complaints in submission order.
    async fn complaints_for_user(&self, user_id: &UserId) -> Result<Vec<Complaint>, StoreError>;

    /// List every complaint across all users in a stable order.
    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError>;

    /// Fetch one of a user's complaints by identifier.
    ///
    /// Fails with [`StoreError::ComplaintNotFound`] when the complaint exists
    /// but belongs to a different user, so callers cannot probe for other
    /// users' complaints.
    async fn complaint_for_user(
        &self,
        user_id: &UserId,
        complaint_id: &ComplaintId,
    ) -> Result<Complaint, StoreError>;

    /// Mark a complaint as resolved.
    ///
    /// Resolving twice is not an error; the second call leaves the complaint
    /// resolved and succeeds.
    async fn resolve_complaint(&self, complaint_id: &ComplaintId) -> Result<(), StoreError>;
}
