//! Todo use-case service.
//!
//! # Responsibility
//! - Provide the consumer-facing list/get/create/patch/delete entry points.
//! - Turn record absence into the domain `NotFound` error.
//!
//! # Invariants
//! - `update` and `remove` confirm existence before delegating the mutation.
//! - A storage-level `NotFound` seen after the existence check is a
//!   service/repository contract violation and is never reported as the
//!   domain `NotFound`.
//! - Service layer remains storage-agnostic and holds no state besides the
//!   repository handle.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::repo::todo_repo::{RepoError, TodoRepository};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Target todo does not exist.
    NotFound(TodoId),
    /// Storage-level failure, including contract violations.
    Repo(RepoError),
}

impl TodoServiceError {
    /// Returns whether this is the domain not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Todo {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo service facade over repository implementations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    ///
    /// Pass `&repo` to keep ownership of the repository with the caller.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all todos in insertion order.
    pub fn find_all(&self) -> TodoServiceResult<Vec<Todo>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one todo by id.
    ///
    /// # Errors
    /// - `NotFound(id)` when no record exists.
    pub fn find_one(&self, id: TodoId) -> TodoServiceResult<Todo> {
        match self.repo.find_one(id)? {
            Some(todo) => Ok(todo),
            None => {
                debug!("event=todo_lookup module=service status=not_found id={id}");
                Err(TodoServiceError::NotFound(id))
            }
        }
    }

    /// Creates a todo. Title content is not validated here.
    pub fn create(&self, input: &NewTodo) -> TodoServiceResult<Todo> {
        let todo = self.repo.create(input)?;
        info!(
            "event=todo_create module=service status=ok id={} has_description={}",
            todo.id,
            todo.description.is_some()
        );
        Ok(todo)
    }

    /// Applies a partial update to an existing todo.
    ///
    /// # Contract
    /// - Existence is checked through `find_one` before mutating.
    /// - Only fields present in `patch` change; `id` never changes.
    pub fn update(&self, id: TodoId, patch: &TodoPatch) -> TodoServiceResult<Todo> {
        self.find_one(id)?;

        let todo = self
            .repo
            .update(id, patch)
            .map_err(|err| write_failure("update", id, err))?;
        info!(
            "event=todo_update module=service status=ok id={} title={} description={} completed={}",
            id,
            patch.title.is_some(),
            patch.description.is_some(),
            patch.completed.is_some()
        );
        Ok(todo)
    }

    /// Removes an existing todo.
    ///
    /// # Errors
    /// - `NotFound(id)` when no record exists, including a second removal.
    pub fn remove(&self, id: TodoId) -> TodoServiceResult<()> {
        if self.repo.find_one(id)?.is_none() {
            debug!("event=todo_remove module=service status=not_found id={id}");
            return Err(TodoServiceError::NotFound(id));
        }

        self.repo
            .remove(id)
            .map_err(|err| write_failure("remove", id, err))?;
        info!("event=todo_remove module=service status=ok id={id}");
        Ok(())
    }
}

fn write_failure(op: &str, id: TodoId, err: RepoError) -> TodoServiceError {
    if matches!(err, RepoError::NotFound(_)) {
        error!(
            "event=todo_{op} module=service status=error error_code=contract_violation id={id} error={err}"
        );
    } else {
        error!("event=todo_{op} module=service status=error id={id} error={err}");
    }
    TodoServiceError::Repo(err)
}

#[cfg(test)]
mod tests {
    use super::{TodoService, TodoServiceError};
    use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
    use crate::repo::memory_repo::InMemoryTodoRepository;
    use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};

    /// Repository whose reads always find a record but whose writes report
    /// the id as missing.
    struct DisagreeingRepository;

    impl TodoRepository for DisagreeingRepository {
        fn find_all(&self) -> RepoResult<Vec<Todo>> {
            Ok(Vec::new())
        }

        fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>> {
            Ok(Some(Todo::from_new(id, &NewTodo::new("ghost"))))
        }

        fn create(&self, input: &NewTodo) -> RepoResult<Todo> {
            Ok(Todo::from_new(1, input))
        }

        fn update(&self, id: TodoId, _patch: &TodoPatch) -> RepoResult<Todo> {
            Err(RepoError::NotFound(id))
        }

        fn remove(&self, _id: TodoId) -> RepoResult<()> {
            Ok(())
        }
    }

    #[test]
    fn storage_not_found_after_check_is_not_domain_not_found() {
        let service = TodoService::new(DisagreeingRepository);
        let err = service
            .update(5, &TodoPatch::default().completed(true))
            .unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, TodoServiceError::Repo(RepoError::NotFound(5))));
    }

    #[test]
    fn not_found_message_names_the_id() {
        let repo = InMemoryTodoRepository::new();
        let service = TodoService::new(&repo);
        let err = service.find_one(3).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Todo 3 not found");
    }

    #[test]
    fn update_on_missing_id_does_not_reach_repository_write() {
        let repo = InMemoryTodoRepository::new();
        let service = TodoService::new(&repo);
        let err = service
            .update(1, &TodoPatch::default().title("x"))
            .unwrap_err();
        assert!(matches!(err, TodoServiceError::NotFound(1)));
        assert!(repo.is_empty());
    }
}
