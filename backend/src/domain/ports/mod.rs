//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with adapters. Inbound
//! adapters drive the [`ComplaintStore`] use-cases; the store in turn is
//! driven by a [`CredentialIssuer`] to mint identifiers and secret codes.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod complaint_store;
mod credential_issuer;

#[cfg(test)]
pub use complaint_store::MockComplaintStore;
pub use complaint_store::{ComplaintStore, StoreError};
#[cfg(test)]
pub use credential_issuer::MockCredentialIssuer;
pub use credential_issuer::{CredentialIssuer, RandomCredentialIssuer};
