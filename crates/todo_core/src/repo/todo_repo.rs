//! Todo repository contract and shared error types.
//!
//! # Responsibility
//! - Define the storage seam every todo backend implements.
//! - Keep identity assignment and record ownership inside the backend.
//!
//! # Invariants
//! - `find_one` reports absence as `Ok(None)`, never as an error.
//! - `create` assigns strictly increasing ids starting at 1, never reused.
//! - `update` fails with `NotFound` for unknown ids and never changes `id`.
//! - `remove` is a silent no-op for unknown ids.
//! - Every returned `Todo` is an owned copy detached from storage.

use crate::db::DbError;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Mutation targeted an id with no stored record.
    NotFound(TodoId),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found in storage: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    /// Returns all current records in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Todo>>;
    fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Allocates the next id and stores a record with `completed = false`.
    fn create(&self, input: &NewTodo) -> RepoResult<Todo>;
    /// Applies present patch fields to an existing record.
    fn update(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo>;
    fn remove(&self, id: TodoId) -> RepoResult<()>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for &R {
    fn find_all(&self) -> RepoResult<Vec<Todo>> {
        (**self).find_all()
    }

    fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        (**self).find_one(id)
    }

    fn create(&self, input: &NewTodo) -> RepoResult<Todo> {
        (**self).create(input)
    }

    fn update(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        (**self).update(id, patch)
    }

    fn remove(&self, id: TodoId) -> RepoResult<()> {
        (**self).remove(id)
    }
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn find_all(&self) -> RepoResult<Vec<Todo>> {
        (**self).find_all()
    }

    fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        (**self).find_one(id)
    }

    fn create(&self, input: &NewTodo) -> RepoResult<Todo> {
        (**self).create(input)
    }

    fn update(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        (**self).update(id, patch)
    }

    fn remove(&self, id: TodoId) -> RepoResult<()> {
        (**self).remove(id)
    }
}
