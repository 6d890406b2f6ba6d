//! Stop collection with id lookup.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::{ExitSide, Stop, parse_time_to_minutes};

use super::error::CatalogError;

/// The full, ordered stop collection.
///
/// Stop ids are unique; this is checked at construction so that lookups by
/// id are unambiguous.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: Vec<Stop>,
    by_id: HashMap<String, usize>,
}

impl StopCatalog {
    /// Build a catalog, rejecting empty or duplicate ids.
    pub fn new(stops: Vec<Stop>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(stops.len());

        for (index, stop) in stops.iter().enumerate() {
            if stop.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if by_id.insert(stop.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(stop.id.clone()));
            }
        }

        Ok(Self { stops, by_id })
    }

    /// Parse a catalog from a JSON array of stops.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let stops: Vec<Stop> = serde_json::from_str(json)?;
        let catalog = Self::new(stops)?;
        catalog.warn_malformed_times();
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            stops = catalog.len(),
            "loaded stop catalog"
        );
        Ok(catalog)
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.by_id.get(id).map(|&i| &self.stops[i])
    }

    /// All stops, in collection order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Stops on one exit side, in collection order.
    pub fn on_side(&self, side: ExitSide) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(move |s| s.exit == side)
    }

    /// The first stop in the collection.
    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the catalog has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Log timetable entries that will never resolve to a departure.
    fn warn_malformed_times(&self) {
        for stop in &self.stops {
            for (service, time) in stop.departures() {
                if let Err(e) = parse_time_to_minutes(time) {
                    warn!(
                        stop = %stop.id,
                        line = %service.line,
                        error = %e,
                        "timetable entry will be ignored"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "id": "east-1",
            "name": "East Exit 1",
            "exit": "east",
            "platform": "1",
            "description": "Rotary, north side",
            "landmarks": ["Bank"],
            "services": [
                {
                    "operator": "Kokusai Kogyo",
                    "line": "Omiya 02",
                    "destination": "Saitama Shintoshin",
                    "via": "Hikawa Shrine",
                    "timetable": ["07:00", "24:05"]
                }
            ],
            "lat": 35.9068,
            "lng": 139.6262
        },
        {
            "id": "west-1",
            "name": "West Exit 1",
            "exit": "west",
            "platform": "1",
            "description": "Under the deck",
            "lat": 35.9064,
            "lng": 139.6208
        },
        {
            "id": "east-2",
            "name": "East Exit 2",
            "exit": "east",
            "platform": "2",
            "description": "",
            "lat": 35.9071,
            "lng": 139.6259
        }
    ]"#;

    fn stop(id: &str) -> Stop {
        Stop {
            id: id.into(),
            name: id.into(),
            exit: ExitSide::East,
            platform: "1".into(),
            description: String::new(),
            landmarks: vec![],
            services: vec![],
            lat: 0.0,
            lng: 0.0,
        }
    }

    #[test]
    fn parse_sample() {
        let catalog = StopCatalog::from_json(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.first().unwrap().id, "east-1");
        assert_eq!(catalog.get("west-1").unwrap().exit, ExitSide::West);
        assert!(catalog.get("north-1").is_none());
    }

    #[test]
    fn on_side_keeps_order() {
        let catalog = StopCatalog::from_json(SAMPLE).unwrap();
        let east: Vec<_> = catalog.on_side(ExitSide::East).map(|s| s.id.as_str()).collect();
        assert_eq!(east, vec!["east-1", "east-2"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = StopCatalog::new(vec![stop("a"), stop("b"), stop("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn empty_id_rejected() {
        let err = StopCatalog::new(vec![stop("a"), stop(" ")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId { index: 1 }));
    }

    #[test]
    fn bad_exit_side_rejected() {
        let json = SAMPLE.replace("\"west\"", "\"south\"");
        assert!(matches!(
            StopCatalog::from_json(&json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn malformed_times_are_kept() {
        let json = SAMPLE.replace("\"24:05\"", "\"late\"");
        let catalog = StopCatalog::from_json(&json).unwrap();
        let stop = catalog.get("east-1").unwrap();
        assert_eq!(stop.services[0].timetable, vec!["07:00", "late"]);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = StopCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = StopCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
