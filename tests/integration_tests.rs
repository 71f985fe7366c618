use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;

use timeutils_rust::{
    distance_to_now, format_distance, format_pattern, from_unix_timestamp_in, parse_instant,
    to_unix_timestamp, FixedClock, RelativeOptions, RelativeTimeFormatter, TimeError,
};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 26, 17, 55, 51).unwrap()
}

fn suffixed() -> RelativeOptions {
    RelativeOptions {
        include_seconds: false,
        add_suffix: true,
    }
}

#[test]
fn one_hour_each_way() {
    let now = reference();

    assert_eq!(
        format_distance(now, now - Duration::hours(1), RelativeOptions::default()),
        "about 1 hour"
    );
    assert_eq!(
        format_distance(now, now - Duration::hours(1), suffixed()),
        "about 1 hour ago"
    );
    assert_eq!(
        format_distance(now, now + Duration::hours(1), suffixed()),
        "about 1 hour from now"
    );
}

#[test]
fn equal_instants_read_as_past() {
    let now = reference();
    assert_eq!(format_distance(now, now, RelativeOptions::default()), "less than a minute");
    assert_eq!(format_distance(now, now, suffixed()), "less than a minute ago");
}

#[test]
fn four_seconds_with_and_without_seconds() {
    let now = reference();
    let target = now - Duration::seconds(4);

    let fine = RelativeOptions::default().with_seconds();
    assert_eq!(format_distance(now, target, fine), "less than 5 seconds");
    assert_eq!(
        format_distance(now, target, RelativeOptions::default()),
        "less than a minute"
    );
}

#[rstest]
#[case(28, "28 days")]
#[case(29, "about 1 month")]
#[case(44, "about 2 months")]
#[case(58, "about 2 months")]
#[case(59, "1 months")]
#[case(60, "1 months")]
#[case(400, "about 1 year")]
fn month_and_year_transitions(#[case] days: i64, #[case] expected: &str) {
    let now = reference();
    let options = RelativeOptions::default();

    assert_eq!(format_distance(now, now - Duration::days(days), options), expected);
    assert_eq!(format_distance(now, now + Duration::days(days), options), expected);
}

#[test]
fn string_targets_against_fixed_clock() {
    let clock = FixedClock(reference());
    let formatter = RelativeTimeFormatter::new(RelativeOptions {
        include_seconds: true,
        add_suffix: true,
    });

    assert_eq!(
        formatter.to_now_with(&clock, "2034-03-26T17:55:51Z").unwrap(),
        "about 9 years from now"
    );
    assert_eq!(
        formatter.to_now_with(&clock, "2014-03-26T17:55:51Z").unwrap(),
        "about 10 years ago"
    );
    assert_eq!(
        formatter.to_now_with(&clock, reference().timestamp() - 25).unwrap(),
        "half a minute ago"
    );
}

#[test]
fn unparseable_targets_raise_invalid_input() {
    for target in ["", "Invalid Date", "32/13/2024", "next tuesday"] {
        match distance_to_now(target, RelativeOptions::default()) {
            Err(TimeError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput for {:?}, got {:?}", target, other),
        }
    }
}

#[test]
fn unix_conversions_agree_with_parser() {
    let ts = to_unix_timestamp(Some("2024-03-26T12:21:55Z")).unwrap();
    assert_eq!(ts, 1711455715);
    assert_eq!(parse_instant(ts).unwrap().timestamp(), ts);

    assert_eq!(
        from_unix_timestamp_in(ts, "MONNAME DD, YYYY HH:mm:ss", &Utc).unwrap(),
        "Mar 26, 2024 12:21:55"
    );
}

#[test]
fn pattern_formatting_of_reference() {
    assert_eq!(
        format_pattern(&reference(), "hh:mm a, DD MONTHNAME YYYY"),
        "05:55 pm, 26 March 2024"
    );
    assert_eq!(
        format_pattern(&reference(), "MM/DD/YYYY HH:mm:ss"),
        "03/26/2024 17:55:51"
    );
}
