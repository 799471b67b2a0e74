//! Domain model for todo records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep create/patch payload shapes next to the record they produce.
//!
//! # Invariants
//! - Every todo is identified by a repository-assigned `TodoId`.
//! - Deletion is a hard remove; there are no tombstones.

pub mod todo;
