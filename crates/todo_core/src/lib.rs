//! Core domain logic for todo tracking.
//! This crate owns the storage seam and the not-found policy above it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use model::todo::{validate_title, NewTodo, Todo, TodoId, TodoPatch, TodoValidationError};
pub use repo::memory_repo::InMemoryTodoRepository;
pub use repo::sqlite_repo::SqliteTodoRepository;
pub use repo::todo_repo::{RepoError, RepoResult, TodoRepository};
pub use service::todo_service::{TodoService, TodoServiceError, TodoServiceResult};

/// Minimal health-check API for driver smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
