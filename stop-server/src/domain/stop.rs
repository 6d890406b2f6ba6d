//! Bus stop and service records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which station exit a stop is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitSide {
    East,
    West,
}

impl ExitSide {
    /// Both sides, in display order.
    pub const ALL: [ExitSide; 2] = [ExitSide::East, ExitSide::West];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ExitSide::East => "East exit",
            ExitSide::West => "West exit",
        }
    }

    /// Wire name, as used in the stop data and the JSON API.
    pub fn as_str(self) -> &'static str {
        match self {
            ExitSide::East => "east",
            ExitSide::West => "west",
        }
    }
}

impl fmt::Display for ExitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route offered from a stop, with its own departure list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Operating company
    pub operator: String,

    /// Line name or number
    pub line: String,

    /// Where the bus is bound for
    pub destination: String,

    /// Route description
    pub via: String,

    /// Departure times as "HH:MM" strings. Not necessarily sorted; hours past
    /// 23 are departures after midnight on the same service day.
    pub timetable: Vec<String>,
}

/// A boarding location near the station.
///
/// Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Exit side the stop belongs to
    pub exit: ExitSide,

    /// Platform label, e.g. "3"
    pub platform: String,

    /// Free-text description
    pub description: String,

    /// Nearby landmarks, in display order
    #[serde(default)]
    pub landmarks: Vec<String>,

    /// Services departing from this stop, in display order
    #[serde(default)]
    pub services: Vec<Service>,

    /// Latitude
    pub lat: f64,

    /// Longitude
    pub lng: f64,
}

impl Stop {
    /// "East exit / Platform 3"
    pub fn badge(&self) -> String {
        format!("{} / Platform {}", self.exit.label(), self.platform)
    }

    /// Iterate over every timetable entry with the service it belongs to.
    pub fn departures(&self) -> impl Iterator<Item = (&Service, &str)> {
        self.services
            .iter()
            .flat_map(|s| s.timetable.iter().map(move |t| (s, t.as_str())))
    }
}
