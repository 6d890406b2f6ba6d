//! Domain types for the bus stop directory.
//!
//! Stops and services are static reference data; times are minute offsets
//! from midnight in the reference zone.

mod stop;
mod time;

pub use stop::{ExitSide, Service, Stop};
pub use time::{
    Clock, FixedClock, MINUTES_PER_DAY, REFERENCE_TZ, ReferenceClock, TimeError,
    current_minutes_in_reference_zone, format_minutes, parse_time_to_minutes,
};
