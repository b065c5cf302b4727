//! Command-line interface module.
//!
//! This module provides the CLI functionality for:
//! - Server management
//! - Benchmark invocation

pub mod commands;
pub mod handlers;
pub mod options;

pub use handlers::{handle_invoke, handle_server};
pub use options::Cli;
