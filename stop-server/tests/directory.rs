//! End-to-end checks through the public API.

use std::path::Path;

use stop_server::departure::{describe_departure, next_departure};
use stop_server::domain::{ExitSide, FixedClock};
use stop_server::selection::{FilterOutcome, SelectOutcome, SelectionState};
use stop_server::stops::StopCatalog;

fn shipped_catalog() -> StopCatalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/stops.json");
    StopCatalog::load(path).unwrap()
}

#[test]
fn single_east_stop_one_hour_out() {
    let catalog = StopCatalog::from_json(
        r#"[{
            "id": "A",
            "name": "A",
            "exit": "east",
            "platform": "1",
            "description": "",
            "services": [{
                "operator": "Op",
                "line": "1",
                "destination": "D",
                "via": "V",
                "timetable": ["08:00"]
            }],
            "lat": 0.0,
            "lng": 0.0
        }]"#,
    )
    .unwrap();

    let now = FixedClock::at("07:00").unwrap().0;
    let next = next_departure(catalog.get("A").unwrap(), now).unwrap();

    assert_eq!(next.minutes_until, 60);
    assert!(!next.is_next_day);
    assert_eq!(describe_departure(next.minutes_until, next.is_next_day), "1 hours from now");
}

#[test]
fn shipped_data_loads() {
    let catalog = shipped_catalog();

    assert!(!catalog.is_empty());
    assert!(catalog.on_side(ExitSide::East).count() > 0);
    assert!(catalog.on_side(ExitSide::West).count() > 0);
}

#[test]
fn shipped_stop_without_services_has_no_departure() {
    let catalog = shipped_catalog();
    let stop = catalog
        .stops()
        .iter()
        .find(|s| s.services.is_empty())
        .unwrap();

    assert!(next_departure(stop, 12 * 60).is_none());
}

#[test]
fn filter_then_select_round() {
    let catalog = shipped_catalog();
    let east = catalog.on_side(ExitSide::East).next().unwrap().id.clone();
    let west = catalog.on_side(ExitSide::West).next().unwrap().id.clone();
    let mut state = SelectionState::new();

    assert_eq!(state.select_stop(&west, &catalog), SelectOutcome::Selected);
    assert_eq!(
        state.set_filter(ExitSide::West, false, &catalog),
        FilterOutcome::Cleared
    );
    assert_eq!(state.select_stop(&west, &catalog), SelectOutcome::Hidden);
    assert_eq!(state.active_stop_id(), None);

    assert_eq!(state.select_stop(&east, &catalog), SelectOutcome::Selected);
    assert_eq!(state.active_stop_id(), Some(east.as_str()));
}
