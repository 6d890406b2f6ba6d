//! Data transfer objects for the page script's JSON API.

use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::domain::ExitSide;
use crate::selection::{Filters, SelectOrigin};

use super::templates::{MarkerView, StopOptionsView};

/// Request to select a stop.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Stop id
    pub stop_id: String,

    /// Which control the selection came from (defaults to the list)
    #[serde(default = "default_origin")]
    pub origin: SelectOrigin,
}

fn default_origin() -> SelectOrigin {
    SelectOrigin::List
}

/// Request to toggle one exit side.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// Side to toggle
    pub side: ExitSide,

    /// Whether stops on that side are shown
    pub enabled: bool,
}

/// Where the map should fly to after a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTarget {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

/// Everything the page needs to redraw after a transition.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    /// Current filter toggles
    pub filters: Filters,

    /// Id of the active stop
    pub active_stop_id: Option<String>,

    /// Markers for visible stops
    pub markers: Vec<MarkerView>,

    /// Stop list contents
    pub options: StopOptionsView,

    /// Rendered details panel
    pub details_html: String,

    /// One-shot recenter request, present after list and startup selections
    pub recenter: Option<MapTarget>,
}

/// Data embedded in the page for the script's first render.
#[derive(Debug, Serialize)]
pub struct PageData<'a> {
    /// Map defaults
    pub map: &'a MapConfig,

    /// Details refresh period in milliseconds
    pub refresh_ms: u64,

    /// Initial view
    pub view: &'a ViewSnapshot,
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
