//! Command-line harness support for cbase.
//!
//! - [`structured_log`]: JSONL records emitted by the `cbase` binary.
//! - [`cli_args`]: turning command-line words into printf arguments.

#![forbid(unsafe_code)]

pub mod cli_args;
pub mod structured_log;

pub use cli_args::CliArg;
pub use structured_log::{LogEntry, LogLevel, Outcome};
