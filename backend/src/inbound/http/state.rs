//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ComplaintStore;

use super::auth::AdminCapability;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store backing every user and complaint operation.
    pub store: Arc<dyn ComplaintStore>,
    /// Capability checked by admin-only endpoints.
    pub admin: AdminCapability,
}

impl HttpState {
    /// Construct state from the store port and the admin capability.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::auth::AdminCapability;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryComplaintStore;
    /// use credentials::SecretCode;
    ///
    /// let admin = AdminCapability::new(SecretCode::generate());
    /// let state = HttpState::new(Arc::new(InMemoryComplaintStore::default()), admin);
    /// let _store = state.store.clone();
    /// ```
    #[must_use]
    pub fn new(store: Arc<dyn ComplaintStore>, admin: AdminCapability) -> Self {
        Self { store, admin }
    }
}
