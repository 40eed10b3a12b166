// ── Line rendering ──
//
// Human-readable and comma-separated machine lines for devices and
// locations. Stateless; formatting cannot fail.

use std::fmt::{Display, Write as _};

use chrono::{DateTime, Local, Offset, TimeZone, Utc};

use crate::model::{Device, Location};

/// `date`-style layout, split around the zone field.
const UNIX_DATE_TIME: &str = "%a %b %e %H:%M:%S";
const UNIX_DATE_YEAR: &str = "%Y";

/// Which line format to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Human,
    Machine,
}

/// Render a domain value as a single line.
pub trait Render {
    /// Human line, timestamps in local time.
    fn human(&self) -> String;

    /// Comma-separated machine line.
    fn machine(&self) -> String;

    fn render(&self, style: LineStyle) -> String {
        match style {
            LineStyle::Human => self.human(),
            LineStyle::Machine => self.machine(),
        }
    }
}

impl Render for Device {
    fn human(&self) -> String {
        human_device_line(self, &Local)
    }

    fn machine(&self) -> String {
        let epoch = self.last_updated.map_or(0, |t| t.timestamp());
        let mut line = format!(
            "{},{},{},{},{},{},{}",
            self.name,
            self.location,
            self.id,
            self.state_name,
            epoch,
            self.error_status,
            self.error_message
        );
        for token in self.faults.tokens() {
            line.push(',');
            line.push_str(token);
        }
        line
    }
}

impl Render for Location {
    fn human(&self) -> String {
        format!("{} (ID {})", self.name, self.id)
    }

    fn machine(&self) -> String {
        format!("{},{}", self.name, self.id)
    }
}

/// Human device line with the timestamp shown in `tz`.
pub fn human_device_line<Tz>(device: &Device, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let since = device
        .last_updated
        .map_or_else(|| "-".to_owned(), |t| format_since(t, tz));

    let mut line = format!(
        "{} at {} (id {}) is {} since {}",
        device.name, device.location, device.id, device.state_name, since
    );

    if device.error {
        let _ = write!(
            line,
            ", ERROR: status = {}, message = {}",
            device.error_status, device.error_message
        );
    }

    let faults = &device.faults;
    for (set, label) in [
        (faults.monitor_only, "Monitor Only"),
        (faults.low_battery, "LowBat"),
        (faults.sensor_error, "Sensor Error"),
        (faults.open_error, "Open Error"),
        (faults.close_error, "Close Error"),
        (faults.control_disabled, "Control disabled"),
    ] {
        if set {
            line.push_str(", ");
            line.push_str(label);
        }
    }
    line
}

fn format_since<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = at.with_timezone(tz);
    // No abbreviation is available for the local zone: zero offset reads
    // as UTC, anything else as a numeric `-0700` offset.
    let zone = if local.offset().fix().local_minus_utc() == 0 {
        "UTC".to_owned()
    } else {
        local.format("%z").to_string()
    };
    format!(
        "{} {zone} {}",
        local.format(UNIX_DATE_TIME),
        local.format(UNIX_DATE_YEAR)
    )
}
