//! Which stop is active and which exit sides are shown.
//!
//! The selection is a two-state machine, no selection or one active stop,
//! driven by three events: filter toggles, stop selection (from a map
//! marker, the stop list, or startup) and an explicit clear. The active stop
//! is always on a visible side; a filter change that hides it clears the
//! selection in the same call.

use tracing::{debug, info};

use crate::domain::{ExitSide, Stop};
use crate::stops::StopCatalog;

/// Exit-side visibility toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Filters {
    pub east: bool,
    pub west: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            east: true,
            west: true,
        }
    }
}

impl Filters {
    /// Whether stops on `side` are shown.
    pub fn shows(self, side: ExitSide) -> bool {
        match side {
            ExitSide::East => self.east,
            ExitSide::West => self.west,
        }
    }

    fn set(&mut self, side: ExitSide, enabled: bool) {
        match side {
            ExitSide::East => self.east = enabled,
            ExitSide::West => self.west = enabled,
        }
    }
}

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectOrigin {
    /// A map marker was activated
    Marker,
    /// A stop was chosen from the list
    List,
    /// The initial selection made when the page opens
    Startup,
}

impl SelectOrigin {
    /// Whether the map should fly to the selected stop.
    ///
    /// Clicking a marker leaves the map where the user put it.
    pub fn recenters(self) -> bool {
        !matches!(self, SelectOrigin::Marker)
    }
}

/// Result of [`SelectionState::select_stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The stop is now active
    Selected,
    /// No stop has that id; nothing changed
    UnknownStop,
    /// The stop's side is filtered out; nothing changed
    Hidden,
}

/// Result of [`SelectionState::set_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The active stop (if any) is still visible
    Unchanged,
    /// The active stop was hidden and the selection cleared
    Cleared,
}

/// The single source of truth for what is selected and what is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active: Option<String>,
    filters: Filters,
}

impl SelectionState {
    /// No selection, both sides visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the active stop.
    pub fn active_stop_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active stop, resolved against `catalog`.
    pub fn active_stop<'a>(&self, catalog: &'a StopCatalog) -> Option<&'a Stop> {
        self.active.as_deref().and_then(|id| catalog.get(id))
    }

    /// Current filter toggles.
    pub fn filters(&self) -> Filters {
        self.filters
    }

    /// Whether `stop` passes the current filters.
    pub fn is_visible(&self, stop: &Stop) -> bool {
        self.filters.shows(stop.exit)
    }

    /// Enable or disable one exit side.
    ///
    /// If this hides the active stop, the selection is cleared before
    /// returning.
    pub fn set_filter(
        &mut self,
        side: ExitSide,
        enabled: bool,
        catalog: &StopCatalog,
    ) -> FilterOutcome {
        self.filters.set(side, enabled);
        debug!(%side, enabled, "filter changed");

        match self.active_stop(catalog) {
            Some(stop) if !self.is_visible(stop) => {
                info!(stop = %stop.id, "active stop hidden by filter, clearing selection");
                self.active = None;
                FilterOutcome::Cleared
            }
            _ => FilterOutcome::Unchanged,
        }
    }

    /// Make `stop_id` the active stop.
    ///
    /// Unknown ids and stops on a hidden side are ignored.
    pub fn select_stop(&mut self, stop_id: &str, catalog: &StopCatalog) -> SelectOutcome {
        let Some(stop) = catalog.get(stop_id) else {
            debug!(stop = stop_id, "ignoring selection of unknown stop");
            return SelectOutcome::UnknownStop;
        };

        if !self.is_visible(stop) {
            debug!(stop = stop_id, side = %stop.exit, "ignoring selection of hidden stop");
            return SelectOutcome::Hidden;
        }

        self.active = Some(stop.id.clone());
        SelectOutcome::Selected
    }

    /// Drop the active stop.
    pub fn clear_selection(&mut self) {
        self.active = None;
    }
}
