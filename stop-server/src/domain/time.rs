//! Wall-clock time handling for bus timetables.
//!
//! Timetables list departures as "HH:MM" strings. Hours may run past 23 to
//! denote departures after midnight that still belong to the same service
//! day ("24:10", "25:05"), so times are kept as plain minute offsets rather
//! than `NaiveTime` values.

use chrono::{Timelike, Utc};
use chrono_tz::Tz;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// The zone every "now" is evaluated in, whatever the host's local zone.
pub const REFERENCE_TZ: Tz = chrono_tz::Asia::Tokyo;

/// Error returned when a timetable entry is not of the form "H:M".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Convert an "HH:MM" timetable entry to minutes since midnight.
///
/// Neither component is range-checked: "24:10" is 1450 and "08:75" is 555.
///
/// # Examples
///
/// ```
/// use stop_server::domain::parse_time_to_minutes;
///
/// assert_eq!(parse_time_to_minutes("07:00").unwrap(), 420);
/// assert_eq!(parse_time_to_minutes("24:10").unwrap(), 1450);
/// assert!(parse_time_to_minutes("0700").is_err());
/// ```
pub fn parse_time_to_minutes(s: &str) -> Result<u32, TimeError> {
    let (hours, minutes) = s
        .split_once(':')
        .ok_or_else(|| TimeError::new(s, "expected HH:MM format"))?;

    let hours: u32 = hours
        .trim()
        .parse()
        .map_err(|_| TimeError::new(s, "invalid hour digits"))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| TimeError::new(s, "invalid minute digits"))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| TimeError::new(s, "time out of range"))
}

/// Format a minute offset as "HH:MM". Offsets past midnight keep counting
/// hours, mirroring the timetable notation.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The current wall-clock time in [`REFERENCE_TZ`], as minutes since midnight.
///
/// Evaluated afresh on every call.
pub fn current_minutes_in_reference_zone() -> u32 {
    let now = Utc::now().with_timezone(&REFERENCE_TZ);
    now.hour() * 60 + now.minute()
}

/// Source of the current time of day.
///
/// The resolver and the web layer ask a `Clock` rather than the system
/// directly so that tests can pin "now".
pub trait Clock: Send + Sync {
    /// Minutes since midnight in the reference zone.
    fn now_minutes(&self) -> u32;
}

/// The real clock, evaluated in [`REFERENCE_TZ`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceClock;

impl Clock for ReferenceClock {
    fn now_minutes(&self) -> u32 {
        current_minutes_in_reference_zone()
    }
}

/// A clock stuck at one minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl FixedClock {
    /// Build from an "HH:MM" string.
    pub fn at(s: &str) -> Result<Self, TimeError> {
        parse_time_to_minutes(s).map(Self)
    }
}

impl Clock for FixedClock {
    fn now_minutes(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(parse_time_to_minutes("07:05").unwrap(), 425);
        assert_eq!(parse_time_to_minutes("23:59").unwrap(), 1439);
        assert_eq!(parse_time_to_minutes("7:5").unwrap(), 425);
    }

    #[test]
    fn parse_past_midnight() {
        assert_eq!(parse_time_to_minutes("24:00").unwrap(), 1440);
        assert_eq!(parse_time_to_minutes("25:30").unwrap(), 1530);
    }

    #[test]
    fn parse_does_not_range_check_minutes() {
        assert_eq!(parse_time_to_minutes("08:75").unwrap(), 555);
    }

    #[test]
    fn parse_invalid_format() {
        assert!(parse_time_to_minutes("0700").is_err());
        assert!(parse_time_to_minutes("").is_err());
        assert!(parse_time_to_minutes("ab:cd").is_err());
        assert!(parse_time_to_minutes("07:").is_err());
        assert!(parse_time_to_minutes("-1:00").is_err());
    }

    #[test]
    fn error_keeps_input() {
        let err = parse_time_to_minutes("7h30").unwrap_err();
        assert_eq!(err.input(), "7h30");
        assert_eq!(err.to_string(), "invalid time \"7h30\": expected HH:MM format");
    }

    #[test]
    fn format_round_trips_timetable_notation() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(425), "07:05");
        assert_eq!(format_minutes(1450), "24:10");
    }

    #[test]
    fn fixed_clock() {
        let clock = FixedClock::at("23:55").unwrap();
        assert_eq!(clock.now_minutes(), 1435);
    }

    #[test]
    fn reference_clock_is_within_a_day() {
        assert!(ReferenceClock.now_minutes() < MINUTES_PER_DAY);
    }
}
