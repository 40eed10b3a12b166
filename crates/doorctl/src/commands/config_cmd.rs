//! Config subcommand handlers.

use std::fmt::Write as _;

use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
    cfg
}

/// Format config as TOML-like text, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = write!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out, "\n\n[profiles.{name}]");
        let mut fields = Vec::new();
        if let Some(ref u) = p.username {
            fields.push(format!("username = \"{u}\""));
        }
        if let Some(ref env) = p.password_env {
            fields.push(format!("password_env = \"{env}\""));
        }
        if p.password.is_some() {
            fields.push(format!("password = \"{MASK}\""));
        }
        if let Some(ref url) = p.base_url {
            fields.push(format!("base_url = \"{url}\""));
        }
        if let Some(ref culture) = p.culture {
            fields.push(format!("culture = \"{culture}\""));
        }
        if let Some(ref brand) = p.brand {
            fields.push(format!("brand = \"{brand}\""));
        }
        if let Some(timeout) = p.timeout {
            fields.push(format!("timeout = {timeout}"));
        }
        let _ = write!(out, "{}", fields.join("\n"));
    }

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let format = config::output_format(global, &cfg)?;
            let rendered = match format {
                OutputFormat::Json => output::render_json(&redacted(&cfg))?,
                OutputFormat::Yaml => output::render_yaml(&redacted(&cfg))?,
                OutputFormat::Human | OutputFormat::Machine | OutputFormat::Table => {
                    format_config_redacted(&cfg)
                }
            };
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if global.profile.is_some() && cfg.profile(&profile_name).is_none() {
                return Err(config::profile_not_found(&profile_name, &cfg));
            }

            let secret = rpassword::prompt_password("Password: ").map_err(|e| {
                CliError::Validation {
                    field: "password".into(),
                    reason: format!("prompt failed: {e}"),
                }
            })?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            doorctl_config::store_password(&profile_name, &SecretString::from(secret))?;
            if !global.quiet {
                eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
