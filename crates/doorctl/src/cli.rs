//! Clap derive structures for the `doorctl` CLI.
//!
//! Defines the command tree, global flags, and output selection.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// doorctl -- open, close and inspect MyQ garage doors
#[derive(Debug, Parser)]
#[command(
    name = "doorctl",
    version,
    about = "Control MyQ garage doors from the command line",
    long_about = "Lists locations and doors on a MyQ account, reports door state,\n\
        and sends guarded open/close commands. A door is only opened when it\n\
        reports Closed, and only closed when it reports Open.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "DOORCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Account email (overrides profile)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Account password (overrides env, keyring and profile)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, env = "DOORCTL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format [default: from config, else human]
    #[arg(long, short = 'o', env = "DOORCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Machine parsable output (same as --output machine)
    #[arg(long = "machine", short = 'M', global = true)]
    pub machine: bool,

    /// Log HTTP requests and responses to stderr
    #[arg(long, short = 'D', global = true)]
    pub debug: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds [default: from config, else 60]
    #[arg(long, env = "DOORCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One descriptive line per item (default)
    Human,
    /// Comma-separated fields, one line per item (scripting)
    Machine,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all doors
    #[command(alias = "ls")]
    List,

    /// Show all locations
    #[command(alias = "places")]
    Locations,

    /// Show details for one door
    Details(DoorArgs),

    /// Print the state (e.g. Open, Closed) of one door
    State(DoorArgs),

    /// Open a door that is currently closed
    Open(DoorArgs),

    /// Close a door that is currently open
    Close(DoorArgs),

    /// List all open doors
    #[command(alias = "listopen")]
    ListOpen,

    /// List all closed doors
    #[command(alias = "listclosed")]
    ListClosed,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct DoorArgs {
    /// Door name (exact, case-sensitive)
    pub door: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Store a password in the system keyring for the active profile
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
