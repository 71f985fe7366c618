//! Relative time phrases such as "about 1 hour ago" or "3 days from now".
//!
//! A delta is reduced to its magnitude and direction, then matched against an
//! ordered bucket table. The same table serves past and future deltas; only the
//! suffix differs.

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::instant::{parse_instant, TimeInput};
use chrono::{DateTime, Utc};
use log::trace;
use serde::{Deserialize, Serialize};

const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;
const AVERAGE_DAYS_PER_YEAR: f64 = 365.25;

/// Per-call switches for [`RelativeTimeFormatter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeOptions {
    /// Use fine-grained buckets below 90 seconds.
    pub include_seconds: bool,
    /// Append " ago" or " from now".
    pub add_suffix: bool,
}

impl RelativeOptions {
    pub fn with_seconds(mut self) -> Self {
        self.include_seconds = true;
        self
    }

    pub fn with_suffix(mut self) -> Self {
        self.add_suffix = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Target precedes the reference, or equals it.
    Past,
    Future,
}

impl Direction {
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Past => " ago",
            Direction::Future => " from now",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

#[derive(Debug, Clone, Copy)]
enum Template {
    Fixed(&'static str),
    /// "{n} {units}", always plural.
    Count(&'static str),
    /// "about {n} {unit}", singular only when n is 1.
    About(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    unit: Unit,
    below: u64,
    template: Template,
}

const fn bucket(unit: Unit, below: u64, template: Template) -> Bucket {
    Bucket {
        unit,
        below,
        template,
    }
}

const FINE_SECONDS: &[Bucket] = &[
    bucket(Unit::Seconds, 5, Template::Fixed("less than 5 seconds")),
    bucket(Unit::Seconds, 10, Template::Fixed("less than 10 seconds")),
    bucket(Unit::Seconds, 20, Template::Fixed("less than 20 seconds")),
    bucket(Unit::Seconds, 40, Template::Fixed("half a minute")),
    bucket(Unit::Seconds, 60, Template::Fixed("less than a minute")),
    bucket(Unit::Seconds, 90, Template::Fixed("1 minute")),
];

const COARSE_SECONDS: &[Bucket] = &[
    bucket(Unit::Seconds, 30, Template::Fixed("less than a minute")),
    bucket(Unit::Seconds, 60, Template::Count("seconds")),
    bucket(Unit::Seconds, 90, Template::Fixed("1 minute")),
];

// Entered only at 90s and above, so the "1 minute" and "1 day" rows never
// match; they keep the table contiguous if the entry point moves.
const LONG_RANGE: &[Bucket] = &[
    bucket(Unit::Minutes, 1, Template::Fixed("1 minute")),
    bucket(Unit::Minutes, 44, Template::Count("minutes")),
    bucket(Unit::Minutes, 89, Template::Fixed("about 1 hour")),
    bucket(Unit::Hours, 24, Template::About("hour")),
    bucket(Unit::Days, 1, Template::Fixed("1 day")),
    bucket(Unit::Days, 29, Template::Count("days")),
    bucket(Unit::Days, 44, Template::Fixed("about 1 month")),
    bucket(Unit::Days, 59, Template::Fixed("about 2 months")),
    bucket(Unit::Months, 12, Template::Count("months")),
    bucket(Unit::Months, 18, Template::Fixed("about 1 year")),
    bucket(Unit::Months, 24, Template::Fixed("over 1 year")),
    bucket(Unit::Years, 2, Template::Fixed("almost 2 years")),
    bucket(Unit::Years, u64::MAX, Template::About("year")),
];

/// A non-negative duration broken down into the units the buckets test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Magnitude {
    seconds: u64,
    minutes: u64,
    hours: u64,
    days: u64,
    months: u64,
    years: u64,
}

impl Magnitude {
    fn from_seconds(seconds: u64) -> Self {
        let minutes = seconds / 60;
        let hours = minutes / 60;
        let days = hours / 24;
        Self {
            seconds,
            minutes,
            hours,
            days,
            months: (days as f64 / AVERAGE_DAYS_PER_MONTH).floor() as u64,
            years: (days as f64 / AVERAGE_DAYS_PER_YEAR).floor() as u64,
        }
    }

    fn get(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Seconds => self.seconds,
            Unit::Minutes => self.minutes,
            Unit::Hours => self.hours,
            Unit::Days => self.days,
            Unit::Months => self.months,
            Unit::Years => self.years,
        }
    }
}

fn render(template: Template, value: u64) -> String {
    match template {
        Template::Fixed(text) => text.to_string(),
        Template::Count(units) => format!("{} {}", value, units),
        Template::About(unit) => {
            let plural = if value == 1 { "" } else { "s" };
            format!("about {} {}{}", value, unit, plural)
        }
    }
}

/// Turns the distance between two instants into an approximate phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeTimeFormatter {
    options: RelativeOptions,
}

impl RelativeTimeFormatter {
    pub fn new(options: RelativeOptions) -> Self {
        Self { options }
    }

    /// Phrase for `target` as seen from `reference`.
    pub fn format(&self, reference: DateTime<Utc>, target: DateTime<Utc>) -> String {
        let delta = reference.signed_duration_since(target);
        // Floor to whole seconds so that a target a fraction of a second
        // ahead still counts as future.
        self.format_delta(delta.num_milliseconds().div_euclid(1000))
    }

    /// Phrase for a signed delta of `reference - target` seconds.
    pub fn format_delta(&self, delta_seconds: i64) -> String {
        let direction = if delta_seconds < 0 {
            Direction::Future
        } else {
            Direction::Past
        };
        let magnitude = Magnitude::from_seconds(delta_seconds.unsigned_abs());

        let short_range = if self.options.include_seconds {
            FINE_SECONDS
        } else {
            COARSE_SECONDS
        };

        let (bucket, value) = short_range
            .iter()
            .chain(LONG_RANGE)
            .map(|bucket| (bucket, magnitude.get(bucket.unit)))
            .find(|(bucket, value)| *value < bucket.below)
            // The last bucket's limit is u64::MAX and years can never reach it.
            .unwrap_or_else(|| {
                let last = &LONG_RANGE[LONG_RANGE.len() - 1];
                (last, magnitude.get(last.unit))
            });

        trace!(
            "delta={}s direction={:?} bucket={:?} value={}",
            delta_seconds,
            direction,
            bucket.template,
            value
        );

        let mut phrase = render(bucket.template, value);
        if self.options.add_suffix {
            phrase.push_str(direction.suffix());
        }
        phrase
    }

    /// Parse `target` and describe it relative to `clock`'s current instant.
    pub fn to_now_with<C: Clock>(
        &self,
        clock: &C,
        target: impl Into<TimeInput>,
    ) -> Result<String> {
        let target = parse_instant(target)?;
        Ok(self.format(clock.now(), target))
    }
}

/// Phrase for `target` as seen from `reference`.
pub fn format_distance(
    reference: DateTime<Utc>,
    target: DateTime<Utc>,
    options: RelativeOptions,
) -> String {
    RelativeTimeFormatter::new(options).format(reference, target)
}

/// Phrase for `target` as seen from the system clock.
pub fn distance_to_now(target: impl Into<TimeInput>, options: RelativeOptions) -> Result<String> {
    distance_with_clock(&SystemClock, target, options)
}

/// Phrase for `target` as seen from `clock`'s current instant.
pub fn distance_with_clock<C: Clock>(
    clock: &C,
    target: impl Into<TimeInput>,
    options: RelativeOptions,
) -> Result<String> {
    RelativeTimeFormatter::new(options).to_now_with(clock, target)
}
