//! Audit logging for ledger mutations
//!
//! Every create, update and soft delete performed by the services can be
//! recorded in an append-only JSON-lines file:
//!
//! - [`AuditEntry`]: one mutation, with the record before and after
//! - [`AuditLogger`]: appends entries and reads them back
//! - [`generate_diff`]: top-level field summary used for updates
//!
//! Auditing is optional; services skip it when no logger is attached.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
