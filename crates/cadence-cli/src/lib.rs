//! Cadence CLI library.
//!
//! Configuration, command execution and output formatting for the `cadence`
//! binary, plus the interactive merge session behind its REPL.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::MergeSession;
