//! Token-based rendering of date-times, e.g. `MM-DD-YY hh:mm:ss a`.
//!
//! The pattern is scanned once from left to right. At each position the longest
//! matching token wins, so `YYYY` is never read as two `YY`s and `MONTHNAME` is
//! never split into `MM`-like fragments. Substituted text is not rescanned.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

pub const DEFAULT_PATTERN: &str = "MM-DD-YY hh:mm:ss a";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    MonthName,
    ShortMonthName,
    FullYear,
    ShortYear,
    Month,
    Day,
    Hour12,
    Hour24,
    Minute,
    Second,
    Meridiem,
}

/// Sorted longest first; ties are disjoint.
const TOKENS: &[(&str, Token)] = &[
    ("MONTHNAME", Token::MonthName),
    ("MONNAME", Token::ShortMonthName),
    ("YYYY", Token::FullYear),
    ("YY", Token::ShortYear),
    ("MM", Token::Month),
    ("DD", Token::Day),
    ("hh", Token::Hour12),
    ("HH", Token::Hour24),
    ("mm", Token::Minute),
    ("ss", Token::Second),
    ("a", Token::Meridiem),
];

fn render_token<Tz: TimeZone>(token: Token, dt: &DateTime<Tz>, out: &mut String) {
    let month_name = MONTH_NAMES[dt.month0() as usize];
    match token {
        Token::MonthName => out.push_str(month_name),
        Token::ShortMonthName => out.push_str(&month_name[..3]),
        Token::FullYear => out.push_str(&dt.year().to_string()),
        Token::ShortYear => out.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
        Token::Month => out.push_str(&format!("{:02}", dt.month())),
        Token::Day => out.push_str(&format!("{:02}", dt.day())),
        Token::Hour12 => out.push_str(&format!("{:02}", dt.hour12().1)),
        Token::Hour24 => out.push_str(&format!("{:02}", dt.hour())),
        Token::Minute => out.push_str(&format!("{:02}", dt.minute())),
        Token::Second => out.push_str(&format!("{:02}", dt.second())),
        Token::Meridiem => out.push_str(if dt.hour12().0 { "pm" } else { "am" }),
    }
}

/// Render `dt` in its own timezone using the tokens of `pattern`.
pub fn format_pattern<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        match TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            Some((text, token)) => {
                render_token(*token, dt, &mut out);
                rest = &rest[text.len()..];
            }
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

/// The current local time rendered with `pattern`.
pub fn current_time(pattern: &str) -> String {
    format_pattern(&Local::now(), pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 26, 17, 5, 9).unwrap()
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(format_pattern(&sample(), DEFAULT_PATTERN), "03-26-24 05:05:09 pm");
    }

    #[test]
    fn test_each_token() {
        let dt = sample();
        assert_eq!(format_pattern(&dt, "YYYY"), "2024");
        assert_eq!(format_pattern(&dt, "YY"), "24");
        assert_eq!(format_pattern(&dt, "MM"), "03");
        assert_eq!(format_pattern(&dt, "DD"), "26");
        assert_eq!(format_pattern(&dt, "hh"), "05");
        assert_eq!(format_pattern(&dt, "HH"), "17");
        assert_eq!(format_pattern(&dt, "mm"), "05");
        assert_eq!(format_pattern(&dt, "ss"), "09");
        assert_eq!(format_pattern(&dt, "a"), "pm");
        assert_eq!(format_pattern(&dt, "MONTHNAME"), "March");
        assert_eq!(format_pattern(&dt, "MONNAME"), "Mar");
    }

    #[test]
    fn test_long_tokens_are_not_split() {
        let dt = sample();
        assert_eq!(format_pattern(&dt, "YYYY-MM-DD"), "2024-03-26");
        assert_eq!(format_pattern(&dt, "YYYYYY"), "202424");
        assert_eq!(
            format_pattern(&dt, "hh:mm a, DD MONTHNAME YYYY"),
            "05:05 pm, 26 March 2024"
        );
        assert_eq!(
            format_pattern(&dt, "MONNAME DD, YY. hh:mm:ss a"),
            "Mar 26, 24. 05:05:09 pm"
        );
    }

    #[test]
    fn test_substitutions_are_not_rescanned() {
        // "March" contains an 'a' and "pm" contains an 'm'; neither is re-read.
        let dt = sample();
        assert_eq!(format_pattern(&dt, "MONTHNAME a"), "March pm");
    }

    #[test]
    fn test_literals_preserved() {
        let dt = sample();
        assert_eq!(format_pattern(&dt, "[HH]h / ünïcode"), "[17]h / ünïcode");
        assert_eq!(format_pattern(&dt, ""), "");
    }

    #[test]
    fn test_midnight_and_noon() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(format_pattern(&midnight, "hh a HH"), "12 am 00");
        assert_eq!(format_pattern(&noon, "hh a HH"), "12 pm 12");
    }

    #[test]
    fn test_renders_in_own_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let dt = sample().with_timezone(&ist);
        assert_eq!(format_pattern(&dt, "YYYY-MM-DD HH:mm"), "2024-03-26 22:35");
    }

    #[test]
    fn test_short_year_pads() {
        let dt = Utc.with_ymd_and_hms(2005, 7, 4, 9, 0, 0).unwrap();
        assert_eq!(format_pattern(&dt, "YY MONNAME"), "05 Jul");
    }

    #[test]
    fn test_current_time_uses_pattern() {
        let rendered = current_time("YYYY");
        assert_eq!(rendered.len(), 4);
        assert!(rendered.chars().all(|c| c.is_ascii_digit()));
    }
}
