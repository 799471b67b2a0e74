//! CLI driver for the todo core.
//!
//! # Responsibility
//! - Select a storage backend and wire it into `TodoService`.
//! - Read newline-delimited commands from stdin, answer with JSON lines.

mod command;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use command::{execute, parse_command, Response};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{
    default_log_level, init_logging, init_stderr_logging, InMemoryTodoRepository,
    SqliteTodoRepository, TodoRepository, TodoService,
};

const STDERR_DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Memory,
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(
    name = "todo_cli",
    version,
    about = "Line-oriented todo CRUD over stdin/stdout"
)]
struct Args {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = Backend::Memory)]
    backend: Backend,

    /// SQLite database file (sqlite backend only; in-memory when omitted)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr otherwise
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_cli_logging(&args)?;

    match args.backend {
        Backend::Memory => run(&TodoService::new(InMemoryTodoRepository::new())),
        Backend::Sqlite => {
            let conn = match &args.db {
                Some(path) => open_db(path)
                    .with_context(|| format!("failed to open `{}`", path.display()))?,
                None => open_db_in_memory()?,
            };
            let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);
            run(&service)
        }
    }
}

fn init_cli_logging(args: &Args) -> anyhow::Result<()> {
    match &args.log_dir {
        Some(dir) => {
            let level = args.log_level.as_deref().unwrap_or(default_log_level());
            let dir = dir
                .to_str()
                .ok_or_else(|| anyhow!("log dir must be valid UTF-8"))?;
            init_logging(level, dir).map_err(|err| anyhow!(err))
        }
        None => {
            let level = args.log_level.as_deref().unwrap_or(STDERR_DEFAULT_LEVEL);
            init_stderr_logging(level).map_err(|err| anyhow!(err))
        }
    }
}

fn run<R: TodoRepository>(service: &TodoService<R>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let response = match parse_command(&line) {
            Ok(Some(command)) => execute(service, command),
            Ok(None) => continue,
            Err(message) => Response::bad_request(message),
        };

        serde_json::to_writer(&mut out, &response)?;
        out.write_all(b"\n")?;
        out.flush()?;
        handled += 1;
    }

    info!("event=cli_exit module=cli status=ok commands={handled}");
    Ok(())
}
