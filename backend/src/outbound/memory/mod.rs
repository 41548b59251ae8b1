//! In-memory complaint store adapter.
//!
//! Backs the [`ComplaintStore`] port with process-local state guarded by a
//! single [`RwLock`]. Every port operation acquires the lock exactly once and
//! performs all of its reads and writes under that one guard, so concurrent
//! request handlers never observe a half-applied registration or submission.
//! State does not survive a restart.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use credentials::{CodeFingerprint, SecretCode};

use crate::domain::ports::{ComplaintStore, CredentialIssuer, RandomCredentialIssuer, StoreError};
use crate::domain::{Complaint, ComplaintDraft, ComplaintId, RegistrationDraft, User, UserId};

/// Attempts made to mint an identifier or secret code not already in use
/// before giving up.
const CREDENTIAL_RETRY_LIMIT: u32 = 8;

/// Everything a registered user owns.
struct UserRecord {
    profile: RegistrationDraft,
    secret_code: SecretCode,
    complaints: Vec<Complaint>,
}

impl UserRecord {
    fn new(profile: RegistrationDraft, secret_code: SecretCode) -> Self {
        Self {
            profile,
            secret_code,
            complaints: Vec::new(),
        }
    }

    /// Build the public [`User`] view of this record.
    fn materialise(&self, id: &UserId) -> User {
        User::new(id.clone(), self.secret_code.clone(), self.profile.clone())
            .with_complaints(self.complaints.clone())
    }
}

/// Mutable store contents.
///
/// `codes` and `owners` are lookup indexes derived from `users`; they are
/// only ever updated in the same critical section as the records they point
/// at.
#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    codes: HashMap<CodeFingerprint, UserId>,
    owners: HashMap<ComplaintId, UserId>,
}

/// Process-local [`ComplaintStore`] implementation.
pub struct InMemoryComplaintStore {
    issuer: Arc<dyn CredentialIssuer>,
    state: RwLock<StoreState>,
}

impl InMemoryComplaintStore {
    /// Create an empty store minting identifiers and codes from the given
    /// issuer.
    #[must_use]
    pub fn new(issuer: Arc<dyn CredentialIssuer>) -> Self {
        Self {
            issuer,
            state: RwLock::new(StoreState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        // A poisoned lock means a panic elsewhere; the data itself is still
        // consistent because every mutation completes under one guard.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryComplaintStore {
    fn default() -> Self {
        Self::new(Arc::new(RandomCredentialIssuer))
    }
}

#[async_trait]
impl ComplaintStore for InMemoryComplaintStore {
    async fn register(&self, draft: RegistrationDraft) -> Result<User, StoreError> {
        let mut state = self.write();

        let mut minted = None;
        for _ in 0..CREDENTIAL_RETRY_LIMIT {
            let id = self.issuer.user_id();
            let code = self.issuer.secret_code();
            if state.users.contains_key(&id) || state.codes.contains_key(&code.fingerprint()) {
                continue;
            }
            minted = Some((id, code));
            break;
        }
        let Some((id, code)) = minted else {
            return Err(StoreError::credential_space_exhausted(
                CREDENTIAL_RETRY_LIMIT,
            ));
        };

        let record = UserRecord::new(draft, code);
        let user = record.materialise(&id);
        state
            .codes
            .insert(record.secret_code.fingerprint(), id.clone());
        state.users.insert(id, record);

        Ok(user)
    }

    async fn authenticate(&self, code: &SecretCode) -> Result<User, StoreError> {
        let state = self.read();
        let user_id = state
            .codes
            .get(&code.fingerprint())
            .ok_or(StoreError::CodeNotFound)?;
        state
            .users
            .get(user_id)
            .map(|record| record.materialise(user_id))
            // A fingerprint without a record means the indexes diverged;
            // treat it like an unknown code rather than leaking the id.
            .ok_or(StoreError::CodeNotFound)
    }

    async fn submit_complaint(
        &self,
        user_id: &UserId,
        draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError> {
        let mut guard = self.write();
        let state = &mut *guard;
        let record = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        let minted = (0..CREDENTIAL_RETRY_LIMIT)
            .map(|_| self.issuer.complaint_id())
            .find(|id| !state.owners.contains_key(id));
        let Some(id) = minted else {
            return Err(StoreError::credential_space_exhausted(
                CREDENTIAL_RETRY_LIMIT,
            ));
        };

        let complaint = Complaint::new(id, draft);
        record.complaints.push(complaint.clone());
        state
            .owners
            .insert(complaint.id().clone(), user_id.clone());

        Ok(complaint)
    }

    async fn complaints_for_user(&self, user_id: &UserId) -> Result<Vec<Complaint>, StoreError> {
        let state = self.read();
        state
            .users
            .get(user_id)
            .map(|record| record.complaints.clone())
            .ok_or_else(|| StoreError::user_not_found(user_id))
    }

    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        let state = self.read();
        let mut complaints: Vec<Complaint> = state
            .users
            .values()
            .flat_map(|record| record.complaints.iter().cloned())
            .collect();
        // Order by identifier so repeated listings are stable regardless of
        // map iteration order.
        complaints.sort_by_key(|complaint| *complaint.id().as_uuid());
        Ok(complaints)
    }

    async fn complaint_for_user(
        &self,
        user_id: &UserId,
        complaint_id: &ComplaintId,
    ) -> Result<Complaint, StoreError> {
        let state = self.read();
        let record = state
            .users
            .get(user_id)
            .ok_or_else(|| StoreError::user_not_found(user_id))?;
        record
            .complaints
            .iter()
            .find(|complaint| complaint.id() == complaint_id)
            .cloned()
            .ok_or_else(|| StoreError::complaint_not_found(complaint_id))
    }

    async fn resolve_complaint(&self, complaint_id: &ComplaintId) -> Result<(), StoreError> {
        let mut state = self.write();
        let owner = state
            .owners
            .get(complaint_id)
            .cloned()
            .ok_or_else(|| StoreError::complaint_not_found(complaint_id))?;
        let complaint = state
            .users
            .get_mut(&owner)
            .and_then(|record| {
                record
                    .complaints
                    .iter_mut()
                    .find(|complaint| complaint.id() == complaint_id)
            })
            .ok_or_else(|| StoreError::complaint_not_found(complaint_id))?;

        complaint.resolve();
        Ok(())
    }
}
