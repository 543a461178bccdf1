//! Store layer between the service and raw storage backends.
//!
//! # Responsibility
//! - Encode/decode the full task collection as one persisted blob.
//! - Isolate serialization details from service orchestration.
//!
//! # Invariants
//! - Store writes validate every record before persistence.
//! - Store reads return semantic errors (`InvalidData`) for malformed
//!   persisted state instead of masking it.

pub mod task_store;
