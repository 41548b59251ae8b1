//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities shared by the inbound
//! adapters and the store. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`User`] / [`UserId`] / [`RegistrationDraft`] — registered users.
//! - [`Complaint`] / [`ComplaintId`] / [`ComplaintDraft`] / [`Rating`] —
//!   complaints and their lifecycle.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`TraceId`] — request correlation identifier.

pub mod complaint;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::complaint::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintValidationError, Rating,
};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{RegistrationDraft, User, UserId, UserValidationError};
