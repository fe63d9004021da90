//! Conversions between wall-clock input, UTC instants and zone-local display.
//!
//! All zone arithmetic goes through `chrono-tz`, so daylight-saving
//! transitions follow the IANA database rather than fixed offsets.

use std::env;
use std::fs;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::SchedulerError;

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M %Z";
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
pub const FALLBACK_ZONE: &str = "UTC";

/// Zones offered by the scheduling form, sorted by name.
pub const SUPPORTED_TIME_ZONES: [&str; 8] = [
    "America/Chicago",
    "America/Los_Angeles",
    "America/New_York",
    "Asia/Dubai",
    "Asia/Tokyo",
    "Australia/Sydney",
    "Europe/London",
    "UTC",
];

const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

pub fn parse_zone(zone_name: &str) -> Result<Tz, SchedulerError> {
    zone_name
        .trim()
        .parse::<Tz>()
        .map_err(|_| SchedulerError::UnknownTimeZone(zone_name.to_string()))
}

/// Renders `instant` as `yyyy-MM-dd HH:mm <abbreviation>` in `zone_name`.
pub fn format_for_display(instant: DateTime<Utc>, zone_name: &str) -> Result<String, SchedulerError> {
    let zone = parse_zone(zone_name)?;
    Ok(instant.with_timezone(&zone).format(DISPLAY_FORMAT).to_string())
}

/// `yyyy-MM-ddTHH:mm` in the given zone, the shape a date-time form field takes.
pub fn to_wall_clock_input(instant: DateTime<Utc>, zone_name: &str) -> Result<String, SchedulerError> {
    let zone = parse_zone(zone_name)?;
    Ok(instant.with_timezone(&zone).format(INPUT_FORMAT).to_string())
}

/// Interprets `wall_clock` as observed in `zone_name` and returns the instant.
///
/// A trailing zone abbreviation (as written by [`format_for_display`]) picks
/// between the two candidates of a repeated hour. Without one the earlier
/// instant wins. An abbreviation the zone is not using at that wall-clock
/// time is rejected. Times skipped by a spring-forward change are moved
/// forward by the length of the gap.
pub fn to_utc(wall_clock: &str, zone_name: &str) -> Result<DateTime<Utc>, SchedulerError> {
    let zone = parse_zone(zone_name)?;
    let (naive, abbreviation) = split_wall_clock(wall_clock)
        .ok_or_else(|| SchedulerError::InvalidDateTime(wall_clock.to_string()))?;

    let resolved = match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => local,
        LocalResult::Ambiguous(earlier, later) => match abbreviation {
            Some(abbr) if abbreviation_of(&later) == abbr && abbreviation_of(&earlier) != abbr => later,
            _ => earlier,
        },
        LocalResult::None => shift_past_gap(&zone, naive)
            .ok_or_else(|| SchedulerError::NonexistentLocalTime {
                wall_clock: wall_clock.to_string(),
                zone: zone_name.to_string(),
            })?
            .with_timezone(&zone),
    };

    // An abbreviation that the zone does not use at that moment names a
    // different instant than the one resolved.
    if abbreviation.is_some_and(|abbr| abbreviation_of(&resolved) != abbr) {
        return Err(SchedulerError::InvalidDateTime(wall_clock.to_string()));
    }
    Ok(resolved.with_timezone(&Utc))
}

/// The viewer's zone: `TZ` if it names a known zone, then the system
/// `/etc/localtime` link, then `/etc/timezone`, then UTC.
///
/// When `/etc/localtime` is a plain copy of a zone file rather than a link
/// and no `/etc/timezone` exists, the zone name cannot be recovered and UTC
/// is reported. `DEFAULT_TIMEZONE` in the config overrides detection.
pub fn detect_user_zone() -> String {
    if let Ok(tz) = env::var("TZ") {
        let tz = tz.trim_start_matches(':');
        if parse_zone(tz).is_ok() {
            return tz.to_string();
        }
    }
    if let Some(zone) = zone_from_localtime_link() {
        return zone;
    }
    if let Some(zone) = fs::read_to_string("/etc/timezone")
        .ok()
        .and_then(|contents| zone_from_timezone_file(&contents))
    {
        return zone;
    }
    FALLBACK_ZONE.to_string()
}

fn zone_from_localtime_link() -> Option<String> {
    let target = fs::read_link("/etc/localtime").ok()?;
    let target = target.to_string_lossy();
    let (_, name) = target.split_once("zoneinfo/")?;
    parse_zone(name).ok().map(|_| name.to_string())
}

// First non-comment line of a Debian-style `/etc/timezone`.
fn zone_from_timezone_file(contents: &str) -> Option<String> {
    let name = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))?;
    parse_zone(name).ok().map(|_| name.to_string())
}

fn split_wall_clock(text: &str) -> Option<(NaiveDateTime, Option<&str>)> {
    let trimmed = text.trim();
    if let Some(naive) = parse_wall_clock(trimmed) {
        return Some((naive, None));
    }
    let (head, tail) = trimmed.rsplit_once(' ')?;
    parse_wall_clock(head.trim_end()).map(|naive| (naive, Some(tail)))
}

fn parse_wall_clock(text: &str) -> Option<NaiveDateTime> {
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn abbreviation_of(local: &DateTime<Tz>) -> String {
    local.format("%Z").to_string()
}

// Walks back to the last valid wall-clock time before the gap, then adds the
// same distance on the UTC timeline.
fn shift_past_gap(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let mut back = Duration::minutes(15);
    while back <= Duration::hours(3) {
        if let Some(before) = zone.from_local_datetime(&(naive - back)).earliest() {
            return Some(before.with_timezone(&Utc) + back);
        }
        back += Duration::minutes(15);
    }
    None
}
