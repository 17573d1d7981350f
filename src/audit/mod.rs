//! Audit log
//!
//! Every create, update and delete on pantry rows, dishes, meal plans and
//! the grocery list is appended to `audit.log` with the entity's state
//! before and after the change.
//!
//! - `AuditEntry`: one operation on one entity.
//! - `AuditLogger`: appends entries as JSON lines and reads them back.
//! - `generate_diff`: field-level summary of what changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
