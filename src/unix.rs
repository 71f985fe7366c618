use crate::error::Result;
use crate::instant::{from_epoch, parse_instant};
use crate::pattern::format_pattern;
use crate::timezone::current_timezone;
use chrono::{Local, TimeZone, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnixFormatOptions {
    /// Append the local zone name after the rendered time.
    pub show_timezone: bool,
}

/// Seconds since the Unix epoch for `target`, or for now when `target` is
/// `None` or `"now"` (any case).
pub fn to_unix_timestamp(target: Option<&str>) -> Result<i64> {
    match target.map(str::trim) {
        None => Ok(Utc::now().timestamp()),
        Some(text) if text.eq_ignore_ascii_case("now") => Ok(Utc::now().timestamp()),
        Some(text) => {
            let instant = parse_instant(text)?;
            debug!("Converted '{}' to {}", text, instant);
            Ok(instant.timestamp())
        }
    }
}

/// Render `seconds` since the epoch in local time using `pattern`.
pub fn from_unix_timestamp(seconds: i64, pattern: &str) -> Result<String> {
    from_unix_timestamp_with(seconds, pattern, UnixFormatOptions::default())
}

pub fn from_unix_timestamp_with(
    seconds: i64,
    pattern: &str,
    options: UnixFormatOptions,
) -> Result<String> {
    let mut rendered = from_unix_timestamp_in(seconds, pattern, &Local)?;
    if options.show_timezone {
        rendered.push(' ');
        rendered.push_str(&current_timezone().name);
    }
    Ok(rendered)
}

/// Render `seconds` since the epoch in `tz` using `pattern`.
pub fn from_unix_timestamp_in<Tz: TimeZone>(
    seconds: i64,
    pattern: &str,
    tz: &Tz,
) -> Result<String> {
    let instant = from_epoch(seconds)?.with_timezone(tz);
    Ok(format_pattern(&instant, pattern))
}
