//! Command dispatch: bridges CLI args -> session operations -> output.

pub mod config_cmd;
pub mod doors;
pub mod locations;

use chrono::{DateTime, Local, Utc};

use doorctl_core::Session;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Resolved output settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct OutputOpts {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, out: OutputOpts) -> Result<(), CliError> {
    match cmd {
        Command::List => doors::list(session, out),
        Command::ListOpen => doors::list_open(session, out),
        Command::ListClosed => doors::list_closed(session, out),
        Command::Details(args) => doors::details(session, &args.door, out),
        Command::State(args) => doors::state(session, &args.door, out),
        Command::Open(args) => doors::open(session, &args.door, out).await,
        Command::Close(args) => doors::close(session, &args.door, out).await,
        Command::Locations => locations::list(session, out),
        // Config and Completions are handled before a session exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Local wall-clock time for tables, `-` when unknown.
pub(crate) fn local_time(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || "-".into(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}
