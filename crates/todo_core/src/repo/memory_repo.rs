//! In-memory todo repository.
//!
//! # Responsibility
//! - Hold todo records in insertion order for the lifetime of the process.
//!
//! # Invariants
//! - The record list and the id counter live behind one lock, so every
//!   mutation sees and advances them together.
//! - Reads may overlap each other but never a mutation.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

const FIRST_TODO_ID: TodoId = 1;

#[derive(Debug)]
struct TodoStore {
    todos: Vec<Todo>,
    next_id: TodoId,
}

/// Process-local todo repository.
#[derive(Debug)]
pub struct InMemoryTodoRepository {
    inner: RwLock<TodoStore>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TodoStore {
                todos: Vec::new(),
                next_id: FIRST_TODO_ID,
            }),
        }
    }

    /// Number of currently stored records.
    pub fn len(&self) -> usize {
        self.read().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write completes before the guard drops, so a poisoned lock still
    // holds a consistent store.
    fn read(&self) -> RwLockReadGuard<'_, TodoStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TodoStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn find_all(&self) -> RepoResult<Vec<Todo>> {
        Ok(self.read().todos.clone())
    }

    fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        Ok(self.read().todos.iter().find(|todo| todo.id == id).cloned())
    }

    fn create(&self, input: &NewTodo) -> RepoResult<Todo> {
        let mut store = self.write();
        let id = store.next_id;
        store.next_id = id.checked_add(1).ok_or_else(|| {
            RepoError::InvalidData("todo id space exhausted".to_string())
        })?;

        let todo = Todo::from_new(id, input);
        store.todos.push(todo.clone());
        Ok(todo)
    }

    fn update(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        let mut store = self.write();
        let slot = store
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(RepoError::NotFound(id))?;

        let updated = slot.with_patch(patch);
        *slot = updated.clone();
        Ok(updated)
    }

    fn remove(&self, id: TodoId) -> RepoResult<()> {
        self.write().todos.retain(|todo| todo.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryTodoRepository;
    use crate::model::todo::{NewTodo, TodoPatch};
    use crate::repo::todo_repo::{RepoError, TodoRepository};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ids_start_at_one_and_skip_removed() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.create(&NewTodo::new("a")).unwrap();
        assert_eq!(first.id, 1);

        repo.remove(first.id).unwrap();
        let second = repo.create(&NewTodo::new("b")).unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_missing_id_is_storage_not_found() {
        let repo = InMemoryTodoRepository::new();
        let err = repo
            .update(42, &TodoPatch::default().completed(true))
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(42)));
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let repo = InMemoryTodoRepository::new();
        repo.create(&NewTodo::new("keep")).unwrap();
        repo.remove(99).unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn returned_records_do_not_alias_storage() {
        let repo = InMemoryTodoRepository::new();
        let mut created = repo.create(&NewTodo::new("original")).unwrap();
        created.title.push_str(" (edited locally)");

        let stored = repo.find_one(created.id).unwrap().unwrap();
        assert_eq!(stored.title, "original");
    }

    #[test]
    fn concurrent_creates_yield_unique_ids() {
        let repo = Arc::new(InMemoryTodoRepository::new());
        let handles = (0..8)
            .map(|worker| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    (0..25)
                        .map(|n| {
                            repo.create(&NewTodo::new(format!("w{worker}-{n}")))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut ids = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&200));
    }
}
