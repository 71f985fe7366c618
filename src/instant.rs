use crate::error::{Result, TimeError};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{debug, trace};

/// Naive date-time layouts, tried in order. Interpreted in the caller's zone.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%I:%M:%S %p, %d %b %Y",
    "%I:%M %p, %d %b %Y",
    "%I:%M:%S %p, %d %B %Y",
    "%I:%M %p, %d %B %Y",
];

/// Date-only layouts; resolved to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Anything that can name a target time.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    Text(String),
    /// Seconds since the Unix epoch.
    Epoch(i64),
    Instant(DateTime<Utc>),
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        Self::Epoch(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Instant(value.with_timezone(&Utc))
    }
}

/// Resolve `input` to an instant, reading zone-less text as local time.
pub fn parse_instant(input: impl Into<TimeInput>) -> Result<DateTime<Utc>> {
    parse_instant_in(input, &Local)
}

/// Resolve `input` to an instant, reading zone-less text in `tz`.
pub fn parse_instant_in<Tz: TimeZone>(
    input: impl Into<TimeInput>,
    tz: &Tz,
) -> Result<DateTime<Utc>> {
    match input.into() {
        TimeInput::Instant(instant) => Ok(instant),
        TimeInput::Epoch(seconds) => from_epoch(seconds),
        TimeInput::Text(text) => parse_text(&text, tz),
    }
}

pub(crate) fn from_epoch(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| {
        TimeError::invalid_input(format!("epoch seconds out of range: {}", seconds))
    })
}

fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimeError::invalid_input("empty time string"));
    }

    if is_integer(text) {
        let seconds = text.parse::<i64>().map_err(|_| {
            TimeError::invalid_input(format!("epoch seconds out of range: {}", text))
        })?;
        trace!("Parsed '{}' as epoch seconds", text);
        return from_epoch(seconds);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        trace!("Parsed '{}' as RFC 3339", text);
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        trace!("Parsed '{}' as RFC 2822", text);
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            debug!("No known layout matched '{}'", text);
            TimeError::invalid_input(format!("unrecognized time: '{}'", text))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            TimeError::invalid_input(format!("'{}' does not exist in the local timezone", text))
        })
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
