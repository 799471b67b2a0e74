//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the todo data access contract.
//! - Isolate storage details (in-memory, SQLite) from service orchestration.
//!
//! # Invariants
//! - Repositories own identity assignment; callers never pick ids.
//! - Absence on read is a value (`Ok(None)`), not an error.

pub mod memory_repo;
pub mod sqlite_repo;
pub mod todo_repo;
