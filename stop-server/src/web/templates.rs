//! Askama templates and the view models they render.
//!
//! The view models are pure projections of the stop catalog, the selection
//! state and the current time. Nothing here mutates state.

use askama::Template;
use serde::Serialize;

use crate::departure::next_departure;
use crate::domain::{ExitSide, Service, Stop};
use crate::selection::{Filters, SelectionState};
use crate::stops::StopCatalog;

/// Shown in place of a countdown when no departure remains.
pub const SERVICE_ENDED: &str = "Service has ended for today";

// ============================================================================
// Templates
// ============================================================================

/// The whole page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub filters: Filters,
    pub options: StopOptionsView,
    pub details: DetailsView,
    /// Initial page data for the script, as JSON
    pub page_json: String,
}

/// Details panel fragment, re-fetched by the page on every refresh tick.
#[derive(Template)]
#[template(path = "details.html")]
pub struct DetailsTemplate {
    pub details: DetailsView,
}

// ============================================================================
// View Models
// ============================================================================

/// A stop marker on the map. Only visible stops get one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Second popup line, e.g. "East exit platform 3"
    pub popup: String,
    /// Whether this marker's popup should be open (the active stop)
    pub popup_open: bool,
}

impl MarkerView {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop, is_active: bool) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
            popup: format!("{} platform {}", stop.exit.label(), stop.platform),
            popup_open: is_active,
        }
    }

    /// Markers for every stop the filters let through, in collection order.
    pub fn project(catalog: &StopCatalog, selection: &SelectionState) -> Vec<Self> {
        let active = selection.active_stop_id();
        catalog
            .stops()
            .iter()
            .filter(|s| selection.is_visible(s))
            .map(|s| Self::from_stop(s, active == Some(s.id.as_str())))
            .collect()
    }
}

/// The stop list control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopOptionsView {
    /// Whether the "Select a stop" placeholder is the selected option
    pub placeholder_selected: bool,
    pub groups: Vec<OptionGroupView>,
}

/// One exit side's stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionGroupView {
    pub side: ExitSide,
    pub label: &'static str,
    pub options: Vec<OptionView>,
}

/// One stop in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

impl StopOptionsView {
    /// Visible stops grouped by side, east first. Sides with no stops are
    /// left out entirely.
    pub fn project(catalog: &StopCatalog, selection: &SelectionState) -> Self {
        let active = selection.active_stop_id();

        let groups: Vec<OptionGroupView> = ExitSide::ALL
            .into_iter()
            .filter(|&side| selection.filters().shows(side))
            .map(|side| OptionGroupView {
                side,
                label: side.label(),
                options: catalog
                    .on_side(side)
                    .map(|s| OptionView {
                        id: s.id.clone(),
                        name: s.name.clone(),
                        selected: active == Some(s.id.as_str()),
                    })
                    .collect(),
            })
            .filter(|g| !g.options.is_empty())
            .collect();

        let any_selected = groups.iter().flat_map(|g| &g.options).any(|o| o.selected);

        Self {
            placeholder_selected: !any_selected,
            groups,
        }
    }
}

/// The details panel: either the active stop or a prompt to pick one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsView {
    pub stop: Option<StopDetailsView>,
}

impl DetailsView {
    /// Nothing selected.
    pub fn placeholder() -> Self {
        Self { stop: None }
    }

    /// Describe the active stop at minute `now`, or the placeholder.
    pub fn project(catalog: &StopCatalog, selection: &SelectionState, now: u32) -> Self {
        Self {
            stop: selection
                .active_stop(catalog)
                .map(|stop| StopDetailsView::from_stop(stop, now)),
        }
    }
}

/// Everything shown for the active stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopDetailsView {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub description: String,
    /// "Next departure: ..." line, or [`SERVICE_ENDED`]
    pub next_departure: String,
    pub services: Vec<ServiceLineView>,
    /// "a · b", present only when the stop lists landmarks
    pub landmarks: Option<String>,
}

impl StopDetailsView {
    /// Create from a domain Stop at minute `now`.
    pub fn from_stop(stop: &Stop, now: u32) -> Self {
        let next_departure = next_departure(stop, now)
            .map(|next| format!("Next departure: {}", next.summary()))
            .unwrap_or_else(|| SERVICE_ENDED.to_string());

        let landmarks = (!stop.landmarks.is_empty()).then(|| stop.landmarks.join(" · "));

        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            badge: stop.badge(),
            description: stop.description.clone(),
            next_departure,
            services: stop.services.iter().map(ServiceLineView::from_service).collect(),
            landmarks,
        }
    }
}

/// One service in the details panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceLineView {
    /// "Tobu Bus Omiya 01: bound for Saitama Shintoshin"
    pub heading: String,
    pub via: String,
    /// "07:00 / 07:30 / 08:10"
    pub timetable: String,
}

impl ServiceLineView {
    /// Create from a domain Service.
    pub fn from_service(service: &Service) -> Self {
        Self {
            heading: format!(
                "{} {}: bound for {}",
                service.operator, service.line, service.destination
            ),
            via: service.via.clone(),
            timetable: service.timetable.join(" / "),
        }
    }
}
