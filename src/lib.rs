pub mod clock;
pub mod config;
pub mod error;
pub mod instant;
pub mod pattern;
pub mod relative;
pub mod timezone;
pub mod unix;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, TimeError};
pub use instant::{parse_instant, parse_instant_in, TimeInput};
pub use pattern::{current_time, format_pattern, DEFAULT_PATTERN};
pub use relative::{
    distance_to_now, distance_with_clock, format_distance, Direction, RelativeOptions,
    RelativeTimeFormatter,
};
pub use timezone::{current_timezone, TimezoneInfo};
pub use unix::{
    from_unix_timestamp, from_unix_timestamp_in, from_unix_timestamp_with, to_unix_timestamp,
    UnixFormatOptions,
};
