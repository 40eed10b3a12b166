mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doorctl_core::Session;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::OutputOpts;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins; `-D` forces debug.
fn init_tracing(global: &GlobalOpts) {
    let filter = if global.debug {
        "debug"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a session
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "doorctl", &mut std::io::stdout());
            Ok(())
        }

        // Everything else logs in and refreshes the inventory once
        cmd => {
            let cfg = config::load_config_or_default();
            let out = OutputOpts {
                format: config::output_format(&cli.global, &cfg)?,
                quiet: cli.global.quiet,
            };
            let plan = config::resolve_session(&cli.global, &cfg)?;

            let session = Session::authenticate(plan.config, &plan.username, &plan.password)
                .await
                .map_err(|e| CliError::from_login(e, &plan.profile))?;
            session.refresh().await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session, out).await
        }
    }
}
