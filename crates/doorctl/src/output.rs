//! Output formatting: human, machine, table, JSON, YAML.
//!
//! Human and machine lines come from `doorctl_core::Render`. Table uses
//! `tabled`; structured formats serialize the domain values via serde.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use doorctl_core::{LineStyle, Render};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of items in the chosen format.
///
/// - `human` / `machine`: one `Render` line per item
/// - `table`: builds rows with `to_row`
/// - `json` / `yaml`: serializes the items via serde
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: serde::Serialize + Render,
    R: Tabled,
{
    match format {
        OutputFormat::Human => Ok(render_lines(data, LineStyle::Human)),
        OutputFormat::Machine => Ok(render_lines(data, LineStyle::Machine)),
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Render a single item in the chosen format.
///
/// Table uses `detail_fn`, a pre-formatted key/value view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + Render,
{
    match format {
        OutputFormat::Human => Ok(data.human()),
        OutputFormat::Machine => Ok(data.machine()),
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_lines<T: Render>(data: &[T], style: LineStyle) -> String {
    data.iter()
        .map(|item| item.render(style))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// YAML output.
pub fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}
