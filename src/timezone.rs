use chrono::{Local, Offset};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

const FALLBACK_ZONE: &str = "UTC";

/// The environment's timezone name and its current UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub name: String,
    pub offset_seconds: i32,
}

impl TimezoneInfo {
    pub fn offset_hours(&self) -> f64 {
        f64::from(self.offset_seconds) / 3600.0
    }
}

impl fmt::Display for TimezoneInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (UTC{:+})", self.name, self.offset_hours())
    }
}

pub fn current_timezone() -> TimezoneInfo {
    let name = resolve_zone_name(
        std::env::var("TZ").ok(),
        iana_time_zone::get_timezone().ok(),
    );
    let offset_seconds = Local::now().offset().fix().local_minus_utc();

    TimezoneInfo {
        name,
        offset_seconds,
    }
}

/// `TZ` wins over the system zone; POSIX allows a leading ':' on file names.
fn resolve_zone_name(tz_env: Option<String>, system: Option<String>) -> String {
    if let Some(name) = tz_env
        .as_deref()
        .map(|tz| tz.trim().trim_start_matches(':'))
        .filter(|tz| !tz.is_empty())
    {
        debug!("Timezone '{}' taken from TZ", name);
        return name.to_string();
    }

    match system {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            debug!("System timezone unavailable, assuming {}", FALLBACK_ZONE);
            FALLBACK_ZONE.to_string()
        }
    }
}
