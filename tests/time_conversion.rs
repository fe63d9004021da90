use chrono::{DateTime, Duration, TimeZone, Utc};
use interviewScheduler::time_utils::{SUPPORTED_TIME_ZONES, format_for_display, to_utc};

// Transition days for the supported zones, plus two ordinary days.
const SAMPLE_DAYS: [(i32, u32, u32); 8] = [
    (2024, 3, 10),
    (2024, 3, 31),
    (2024, 4, 7),
    (2024, 10, 6),
    (2024, 10, 27),
    (2024, 11, 3),
    (2024, 1, 15),
    (2024, 7, 15),
];

fn instants_around(year: i32, month: u32, day: u32) -> impl Iterator<Item = DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap() - Duration::hours(12);
    (0..(48 * 4)).map(move |step| start + Duration::minutes(15 * step))
}

#[test]
fn display_then_parse_round_trips_in_every_supported_zone() {
    for zone in SUPPORTED_TIME_ZONES {
        for (year, month, day) in SAMPLE_DAYS {
            for instant in instants_around(year, month, day) {
                let shown = format_for_display(instant, zone).unwrap();
                let parsed = to_utc(&shown, zone).unwrap();
                assert_eq!(parsed, instant, "{zone}: {shown}");
            }
        }
    }
}

#[test]
fn display_uses_daylight_abbreviations() {
    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    assert_eq!(format_for_display(summer, "Europe/London").unwrap(), "2024-07-15 13:00 BST");
    assert_eq!(format_for_display(winter, "Europe/London").unwrap(), "2024-01-15 12:00 GMT");
    assert_eq!(format_for_display(winter, "Australia/Sydney").unwrap(), "2024-01-15 23:00 AEDT");
    assert_eq!(format_for_display(summer, "Australia/Sydney").unwrap(), "2024-07-15 22:00 AEST");
}

#[test]
fn same_wall_clock_differs_across_zones() {
    let new_york = to_utc("2024-07-15T09:00", "America/New_York").unwrap();
    let chicago = to_utc("2024-07-15T09:00", "America/Chicago").unwrap();
    assert_eq!(chicago - new_york, Duration::hours(1));
}
