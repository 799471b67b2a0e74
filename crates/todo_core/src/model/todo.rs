//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its create/patch payloads.
//! - Provide copy-with-changes semantics for partial updates.
//!
//! # Invariants
//! - `id` is assigned by a repository and never changes afterwards.
//! - `completed` starts as `false`.
//! - Patch fields are independently absent or present; absent fields never
//!   touch the stored value.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Repository-assigned identifier. Starts at 1 and is never reused.
pub type TodoId = u64;

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    /// Omitted from the wire shape when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
}

impl Todo {
    /// Creates a freshly stored record for `id` from create input.
    pub fn from_new(id: TodoId, input: &NewTodo) -> Self {
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            completed: false,
        }
    }

    /// Returns a new record with every present patch field applied.
    ///
    /// `id` is carried over unchanged.
    pub fn with_patch(&self, patch: &TodoPatch) -> Self {
        Self {
            id: self.id,
            title: patch
                .title
                .clone()
                .unwrap_or_else(|| self.title.clone()),
            description: match &patch.description {
                Some(value) => value.clone(),
                None => self.description.clone(),
            },
            completed: patch.completed.unwrap_or(self.completed),
        }
    }
}

/// Create payload. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update payload.
///
/// `description` is a nested option so "clear it" (`Some(None)`), "set it"
/// (`Some(Some(..))`) and "leave it" (`None`) stay distinct. From JSON, a
/// missing key is absent and an explicit `null` clears. Unknown keys are
/// rejected so a misspelled field cannot turn into an empty patch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

// Only invoked when the key exists, so `null` maps to `Some(None)`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Boundary validation error for todo input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title is empty after trim.
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be blank"),
        }
    }
}

impl Error for TodoValidationError {}

/// Checks the non-empty title rule.
///
/// The service does not call this; outer boundaries do before forwarding.
pub fn validate_title(title: &str) -> Result<(), TodoValidationError> {
    if title.trim().is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, NewTodo, Todo, TodoPatch, TodoValidationError};

    fn sample() -> Todo {
        Todo::from_new(7, &NewTodo::new("write docs").with_description("api section"))
    }

    #[test]
    fn from_new_defaults_completed_to_false() {
        let todo = sample();
        assert_eq!(todo.id, 7);
        assert!(!todo.completed);
        assert_eq!(todo.description.as_deref(), Some("api section"));
    }

    #[test]
    fn empty_patch_is_identity() {
        let todo = sample();
        assert!(TodoPatch::default().is_empty());
        assert_eq!(todo.with_patch(&TodoPatch::default()), todo);
    }

    #[test]
    fn patch_distinguishes_clear_from_absent() {
        let todo = sample();
        let cleared = todo.with_patch(&TodoPatch::default().clear_description());
        assert_eq!(cleared.description, None);

        let emptied = todo.with_patch(&TodoPatch::default().description(""));
        assert_eq!(emptied.description.as_deref(), Some(""));

        let untouched = todo.with_patch(&TodoPatch::default().completed(true));
        assert_eq!(untouched.description.as_deref(), Some("api section"));
        assert!(untouched.completed);
    }

    #[test]
    fn with_patch_does_not_touch_source_record() {
        let todo = sample();
        let updated = todo.with_patch(&TodoPatch::default().title("renamed"));
        assert_eq!(updated.title, "renamed");
        assert_eq!(todo.title, "write docs");
        assert_eq!(updated.id, todo.id);
    }

    #[test]
    fn validate_title_rejects_blank() {
        assert_eq!(validate_title("  "), Err(TodoValidationError::EmptyTitle));
        assert!(validate_title("a").is_ok());
    }
}
