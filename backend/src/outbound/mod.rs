//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are thin
//! translators between domain ports and their backing infrastructure and
//! contain no business logic.
//!
//! - **memory**: process-local complaint store guarded by a single lock.

pub mod memory;
