//! Line protocol for the todo CLI.
//!
//! # Responsibility
//! - Parse one stdin line into a `Command`.
//! - Run commands against `TodoService` and shape one JSON response each.
//!
//! # Invariants
//! - Blank titles are rejected here, before the service is called.
//! - Domain `NotFound` maps to `not_found`; storage failures map to
//!   `internal` and are logged.

use log::{debug, error};
use serde::Serialize;
use serde_json::Value;
use todo_core::{
    core_version, ping, validate_title, NewTodo, TodoId, TodoPatch, TodoRepository, TodoService,
    TodoServiceError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Get(TodoId),
    Create(NewTodo),
    Patch(TodoId, TodoPatch),
    Delete(TodoId),
    Ping,
    Version,
}

/// One JSON line written per command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    fn failure(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
            message: Some(message.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::failure("bad_request", message)
    }
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" => Command::List,
        "get" => Command::Get(parse_id(rest)?),
        "create" => Command::Create(parse_new_todo(rest)?),
        "patch" => {
            let (id, payload) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: patch <id> {json}".to_string())?;
            Command::Patch(parse_id(id)?, parse_patch(payload.trim())?)
        }
        "delete" => Command::Delete(parse_id(rest)?),
        "ping" => Command::Ping,
        "version" => Command::Version,
        other => return Err(format!("unknown command `{other}`")),
    };

    Ok(Some(command))
}

fn parse_id(value: &str) -> Result<TodoId, String> {
    value
        .parse::<TodoId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("invalid todo id `{value}`; expected a positive integer"))
}

fn parse_new_todo(rest: &str) -> Result<NewTodo, String> {
    let input = if rest.starts_with('{') {
        serde_json::from_str::<NewTodo>(rest).map_err(|err| format!("invalid create payload: {err}"))?
    } else {
        NewTodo::new(rest)
    };
    validate_title(&input.title).map_err(|err| err.to_string())?;
    Ok(input)
}

fn parse_patch(payload: &str) -> Result<TodoPatch, String> {
    let patch = serde_json::from_str::<TodoPatch>(payload)
        .map_err(|err| format!("invalid patch payload: {err}"))?;
    if let Some(title) = &patch.title {
        validate_title(title).map_err(|err| err.to_string())?;
    }
    Ok(patch)
}

/// Runs one command and shapes its response.
pub fn execute<R: TodoRepository>(service: &TodoService<R>, command: Command) -> Response {
    let result = match command {
        Command::List => service.find_all().map(encode),
        Command::Get(id) => service.find_one(id).map(encode),
        Command::Create(input) => service.create(&input).map(encode),
        Command::Patch(id, patch) => service.update(id, &patch).map(encode),
        Command::Delete(id) => service.remove(id).map(|()| Ok(Value::Null)),
        Command::Ping => return Response::success(Value::from(ping())),
        Command::Version => return Response::success(Value::from(core_version())),
    };

    respond(result)
}

fn respond(result: Result<serde_json::Result<Value>, TodoServiceError>) -> Response {
    match result {
        Ok(Ok(data)) => Response::success(data),
        Ok(Err(err)) => {
            error!("event=cli_command module=cli status=error error_code=encode_failed error={err}");
            Response::failure("internal", format!("failed to encode response: {err}"))
        }
        Err(err @ TodoServiceError::NotFound(_)) => {
            debug!("event=cli_command module=cli status=not_found error={err}");
            Response::failure("not_found", err.to_string())
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            Response::failure("internal", err.to_string())
        }
    }
}

fn encode<T: Serialize>(value: T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}
