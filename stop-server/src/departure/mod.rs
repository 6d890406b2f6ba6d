//! Next-departure resolution.
//!
//! Given a stop and the current minute of the day, finds the soonest
//! upcoming departure across all of the stop's services. Departures earlier
//! than "now" wrap around to tomorrow.

use tracing::debug;

use crate::domain::{MINUTES_PER_DAY, Service, Stop, parse_time_to_minutes};

/// Label shown when a bus is due now.
pub const DEPARTING_NOW: &str = "departing now";

/// The soonest departure from a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextDeparture<'a> {
    /// The service the departure belongs to
    pub service: &'a Service,

    /// The timetable entry, exactly as written
    pub time: &'a str,

    /// Minutes from now until the departure
    pub minutes_until: i64,

    /// Whether the departure falls on the following calendar day
    pub is_next_day: bool,
}

impl NextDeparture<'_> {
    /// Countdown text, e.g. "5 minutes from now".
    pub fn describe(&self) -> String {
        describe_departure(self.minutes_until, self.is_next_day)
    }

    /// Countdown plus departure time and service, e.g.
    /// "5 minutes from now (08:00 from Tobu Bus Omiya 01)".
    pub fn summary(&self) -> String {
        format!(
            "{} ({} from {} {})",
            self.describe(),
            self.time,
            self.service.operator,
            self.service.line
        )
    }
}

/// Find the next departure from `stop` given `now` in minutes since midnight.
///
/// Every timetable entry of every service is a candidate; entries need not
/// be sorted. An entry already past today wraps to tomorrow (+1440 minutes)
/// and is marked as next-day, as is any entry written past midnight
/// ("24:10"). The smallest wait wins; on a tie the first entry encountered
/// is kept.
///
/// Returns `None` when the stop has no services or every timetable is empty.
/// Entries that do not parse are skipped.
pub fn next_departure(stop: &Stop, now: u32) -> Option<NextDeparture<'_>> {
    let now = i64::from(now);
    let day = i64::from(MINUTES_PER_DAY);
    let mut best: Option<NextDeparture<'_>> = None;

    for (service, time) in stop.departures() {
        let total = match parse_time_to_minutes(time) {
            Ok(total) => i64::from(total),
            Err(e) => {
                debug!(stop = %stop.id, error = %e, "skipping malformed timetable entry");
                continue;
            }
        };

        let mut diff = total - now;
        let mut is_next_day = false;
        if diff < 0 {
            diff += day;
            is_next_day = true;
        }

        if best.is_none_or(|b| diff < b.minutes_until) {
            best = Some(NextDeparture {
                service,
                time,
                minutes_until: diff,
                is_next_day: is_next_day || total >= day,
            });
        }
    }

    best
}

/// Render a countdown as text.
///
/// Hours appear only when there is at least one whole hour; minutes appear
/// when non-zero or when there are no whole hours. Zero or negative waits
/// read as [`DEPARTING_NOW`].
///
/// # Examples
///
/// ```
/// use stop_server::departure::describe_departure;
///
/// assert_eq!(describe_departure(0, false), "departing now");
/// assert_eq!(describe_departure(125, false), "2 hours 5 minutes from now");
/// assert_eq!(describe_departure(60, false), "1 hours from now");
/// assert_eq!(describe_departure(90, true), "1 hours 30 minutes from now (next day)");
/// ```
pub fn describe_departure(minutes_until: i64, is_next_day: bool) -> String {
    if minutes_until <= 0 {
        return DEPARTING_NOW.to_string();
    }

    let hours = minutes_until / 60;
    let remainder = minutes_until % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours} hours"));
    }
    if remainder > 0 || hours == 0 {
        parts.push(format!("{remainder} minutes"));
    }

    let mut text = format!("{} from now", parts.join(" "));
    if is_next_day {
        text.push_str(" (next day)");
    }
    text
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::domain::{ExitSide, format_minutes};
    use proptest::prelude::*;

    fn arb_timetable() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec((0u32..MINUTES_PER_DAY).prop_map(format_minutes), 0..8)
    }

    fn arb_stop() -> impl Strategy<Value = Stop> {
        prop::collection::vec(arb_timetable(), 0..4).prop_map(|timetables| Stop {
            id: "P".into(),
            name: "Prop".into(),
            exit: ExitSide::West,
            platform: "1".into(),
            description: String::new(),
            landmarks: vec![],
            services: timetables
                .into_iter()
                .enumerate()
                .map(|(i, timetable)| Service {
                    operator: "Op".into(),
                    line: i.to_string(),
                    destination: "Dest".into(),
                    via: "Via".into(),
                    timetable,
                })
                .collect(),
            lat: 0.0,
            lng: 0.0,
        })
    }

    proptest! {
        /// Same-day entries always resolve to a wait within one day.
        #[test]
        fn wait_is_within_a_day(stop in arb_stop(), now in 0u32..MINUTES_PER_DAY) {
            if let Some(next) = next_departure(&stop, now) {
                prop_assert!(next.minutes_until >= 0);
                prop_assert!(next.minutes_until < i64::from(MINUTES_PER_DAY));
            }
        }

        /// A result exists exactly when some timetable has an entry.
        #[test]
        fn none_only_when_empty(stop in arb_stop(), now in 0u32..MINUTES_PER_DAY) {
            let has_entries = stop.departures().next().is_some();
            prop_assert_eq!(next_departure(&stop, now).is_some(), has_entries);
        }

        /// No other entry departs sooner than the chosen one.
        #[test]
        fn nothing_departs_sooner(stop in arb_stop(), now in 0u32..MINUTES_PER_DAY) {
            if let Some(next) = next_departure(&stop, now) {
                for (_, time) in stop.departures() {
                    let total = i64::from(parse_time_to_minutes(time).unwrap());
                    let wait = (total - i64::from(now)).rem_euclid(i64::from(MINUTES_PER_DAY));
                    prop_assert!(wait >= next.minutes_until);
                }
            }
        }

        /// Next-day marking matches whether the departure is earlier than now.
        #[test]
        fn next_day_iff_wrapped(stop in arb_stop(), now in 0u32..MINUTES_PER_DAY) {
            if let Some(next) = next_departure(&stop, now) {
                let total = parse_time_to_minutes(next.time).unwrap();
                prop_assert_eq!(next.is_next_day, total < now);
            }
        }
    }
}
