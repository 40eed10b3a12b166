//! Location command handlers.

use tabled::Tabled;

use doorctl_core::{Location, Session};

use crate::error::CliError;
use crate::output;

use super::OutputOpts;

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Connect Server")]
    connect_server_id: String,
    #[tabled(rename = "Devices")]
    device_list: String,
}

impl From<&Location> for LocationRow {
    fn from(l: &Location) -> Self {
        Self {
            id: l.id.to_string(),
            name: l.name.clone(),
            connect_server_id: l.connect_server_id.clone(),
            device_list: l.device_list.clone(),
        }
    }
}

/// All locations, by ascending gateway id.
pub fn list(session: &Session, out: OutputOpts) -> Result<(), CliError> {
    let locations = session.locations();
    let rendered = output::render_list(out.format, &locations, |l| LocationRow::from(l))?;
    output::print_output(&rendered, out.quiet);
    Ok(())
}
