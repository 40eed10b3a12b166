//! Door command handlers.

use serde::Serialize;
use tabled::Tabled;

use doorctl_core::{Device, DoorState, Session};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::{OutputOpts, local_time};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Faults")]
    faults: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            location: d.location.clone(),
            state: d.state_name.clone(),
            updated: local_time(d.last_updated),
            faults: fault_summary(d),
        }
    }
}

fn fault_summary(d: &Device) -> String {
    let mut faults: Vec<&str> = d.faults.tokens().collect();
    if d.error {
        faults.insert(0, "Error");
    }
    faults.join(", ")
}

fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("Location:  {} (gateway {})", d.location, d.gateway_id),
        format!("State:     {}", d.state_name),
        format!("Updated:   {}", local_time(d.last_updated)),
    ];
    if let Some(type_id) = d.device_type_id {
        lines.push(format!("Type:      {type_id}"));
    }
    if d.error {
        lines.push(format!(
            "Error:     status = {}, message = {}",
            d.error_status, d.error_message
        ));
    }
    if d.faults.any() {
        lines.push(format!("Faults:    {}", fault_summary(d)));
    }
    lines.join("\n")
}

/// Structured view for `state` under json/yaml.
#[derive(Serialize)]
struct StateView<'a> {
    name: &'a str,
    state: DoorState,
    state_name: &'a str,
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn list(session: &Session, out: OutputOpts) -> Result<(), CliError> {
    print_devices(&session.devices(), out)
}

pub fn list_open(session: &Session, out: OutputOpts) -> Result<(), CliError> {
    print_devices(&session.devices_in_state(DoorState::Open), out)
}

pub fn list_closed(session: &Session, out: OutputOpts) -> Result<(), CliError> {
    print_devices(&session.devices_in_state(DoorState::Closed), out)
}

fn print_devices(devices: &[Device], out: OutputOpts) -> Result<(), CliError> {
    let rendered = output::render_list(out.format, devices, |d| DeviceRow::from(d))?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

pub fn details(session: &Session, name: &str, out: OutputOpts) -> Result<(), CliError> {
    let device = session.find_by_name(name)?;
    let rendered = output::render_single(out.format, &device, detail)?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}

/// Print only the state name of one door.
pub fn state(session: &Session, name: &str, out: OutputOpts) -> Result<(), CliError> {
    let device = session.find_by_name(name)?;
    let view = StateView {
        name: &device.name,
        state: device.state,
        state_name: &device.state_name,
    };
    let rendered = match out.format {
        OutputFormat::Json => output::render_json(&view)?,
        OutputFormat::Yaml => output::render_yaml(&view)?,
        OutputFormat::Human | OutputFormat::Machine | OutputFormat::Table => {
            device.state_name.clone()
        }
    };
    output::print_output(&rendered, out.quiet);
    Ok(())
}

pub async fn open(session: &Session, name: &str, out: OutputOpts) -> Result<(), CliError> {
    let device = session.open(name).await?;
    if !out.quiet {
        eprintln!("✓ Open requested for door '{}'", device.name);
    }
    Ok(())
}

pub async fn close(session: &Session, name: &str, out: OutputOpts) -> Result<(), CliError> {
    let device = session.close(name).await?;
    if !out.quiet {
        eprintln!("✓ Close requested for door '{}'", device.name);
    }
    Ok(())
}
