//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep driver layers (CLI, tests) decoupled from storage details.

pub mod todo_service;
