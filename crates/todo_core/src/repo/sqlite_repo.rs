//! SQLite-backed todo repository.
//!
//! # Responsibility
//! - Provide the `TodoRepository` contract over the `todos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT`, which never reuses
//!   a value even after the row is deleted.
//! - Listing order is `id ASC`, which equals insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};
use rusqlite::{params, Connection, Row};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed
FROM todos";

/// SQLite-backed todo repository over a borrowed connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - `InvalidData` when the `todos` table is missing (migrations not run).
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todos');",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::InvalidData(
                "table `todos` is missing; open the connection through db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }

    fn select_by_id(&self, db_id: i64) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![db_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }
        Ok(None)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn find_one(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        match id_to_db(id) {
            Some(db_id) => self.select_by_id(db_id),
            None => Ok(None),
        }
    }

    fn create(&self, input: &NewTodo) -> RepoResult<Todo> {
        self.conn.execute(
            "INSERT INTO todos (title, description, completed) VALUES (?1, ?2, 0);",
            params![input.title.as_str(), input.description.as_deref()],
        )?;

        let id = id_from_db(self.conn.last_insert_rowid())?;
        Ok(Todo::from_new(id, input))
    }

    fn update(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        let db_id = id_to_db(id).ok_or(RepoError::NotFound(id))?;
        let tx = self.conn.unchecked_transaction()?;

        let current = self.select_by_id(db_id)?.ok_or(RepoError::NotFound(id))?;
        let updated = current.with_patch(patch);
        tx.execute(
            "UPDATE todos
             SET
                title = ?1,
                description = ?2,
                completed = ?3
             WHERE id = ?4;",
            params![
                updated.title.as_str(),
                updated.description.as_deref(),
                bool_to_int(updated.completed),
                db_id,
            ],
        )?;
        tx.commit()?;

        Ok(updated)
    }

    fn remove(&self, id: TodoId) -> RepoResult<()> {
        if let Some(db_id) = id_to_db(id) {
            self.conn
                .execute("DELETE FROM todos WHERE id = ?1;", params![db_id])?;
        }
        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id = id_from_db(row.get("id")?)?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    Ok(Todo {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
    })
}

fn id_to_db(id: TodoId) -> Option<i64> {
    i64::try_from(id).ok()
}

fn id_from_db(value: i64) -> RepoResult<TodoId> {
    TodoId::try_from(value)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid id `{value}` in todos.id")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

