//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{MapConfig, ServerConfig};
use crate::domain::{Clock, ExitSide};
use crate::selection::{FilterOutcome, SelectOrigin, SelectOutcome, SelectionState};
use crate::stops::StopCatalog;

use super::dto::{MapTarget, ViewSnapshot};
use super::templates::{DetailsTemplate, DetailsView, MarkerView, StopOptionsView};

/// The page's mutable state: the selection plus what it last drew.
///
/// Every transition re-projects the details panel before returning, so the
/// cached projection never describes a stop that is no longer active.
#[derive(Debug, Clone)]
pub struct Session {
    selection: SelectionState,
    /// Stop to fly to on the next snapshot
    recenter: Option<String>,
    details: DetailsView,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            selection: SelectionState::new(),
            recenter: None,
            details: DetailsView::placeholder(),
        }
    }
}

impl Session {
    /// No selection, both sides visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The last details projection.
    pub fn details(&self) -> &DetailsView {
        &self.details
    }

    /// Select a stop and redraw the details panel.
    pub fn select(
        &mut self,
        stop_id: &str,
        origin: SelectOrigin,
        catalog: &StopCatalog,
        now: u32,
    ) -> SelectOutcome {
        let outcome = self.selection.select_stop(stop_id, catalog);
        if outcome == SelectOutcome::Selected {
            self.recenter = origin.recenters().then(|| stop_id.to_string());
            self.refresh_details(catalog, now);
        }
        outcome
    }

    /// Toggle an exit side and redraw the details panel.
    pub fn set_filter(
        &mut self,
        side: ExitSide,
        enabled: bool,
        catalog: &StopCatalog,
        now: u32,
    ) -> FilterOutcome {
        let outcome = self.selection.set_filter(side, enabled, catalog);
        if outcome == FilterOutcome::Cleared {
            self.recenter = None;
        }
        self.refresh_details(catalog, now);
        outcome
    }

    /// Clear the selection and show the placeholder.
    pub fn clear(&mut self) {
        self.selection.clear_selection();
        self.recenter = None;
        self.details = DetailsView::placeholder();
    }

    /// Re-project the details panel. Returns whether a stop is active.
    pub fn refresh_details(&mut self, catalog: &StopCatalog, now: u32) -> bool {
        self.details = DetailsView::project(catalog, &self.selection, now);
        self.details.stop.is_some()
    }

    /// Take the pending recenter request, if any.
    fn take_recenter(&mut self) -> Option<String> {
        self.recenter.take()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Static stop collection
    pub catalog: Arc<StopCatalog>,

    /// Source of "now"
    pub clock: Arc<dyn Clock>,

    /// Map defaults for the page
    pub map: Arc<MapConfig>,

    /// How often the details panel is refreshed
    pub refresh_interval: Duration,

    /// The one page session
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create the app state and run the startup selection.
    pub fn new(catalog: StopCatalog, clock: Arc<dyn Clock>, config: &ServerConfig) -> Self {
        let mut session = Session::new();

        if config.select_first_on_startup {
            if let Some(first) = catalog.first() {
                let id = first.id.clone();
                let outcome =
                    session.select(&id, SelectOrigin::Startup, &catalog, clock.now_minutes());
                info!(stop = %id, ?outcome, "startup selection");
            }
        }

        Self {
            catalog: Arc::new(catalog),
            clock,
            map: Arc::new(config.map.clone()),
            refresh_interval: config.refresh_interval,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Current minute of the day in the reference zone.
    pub fn now(&self) -> u32 {
        self.clock.now_minutes()
    }

    /// Project the session into a snapshot, consuming any recenter request.
    pub fn snapshot(&self, session: &mut Session) -> Result<ViewSnapshot, askama::Error> {
        let recenter = session.take_recenter();
        self.build_snapshot(session, recenter.as_deref())
    }

    /// Project the session into a snapshot, leaving any recenter request
    /// pending for the next transition or page load.
    pub fn peek_snapshot(&self, session: &Session) -> Result<ViewSnapshot, askama::Error> {
        self.build_snapshot(session, None)
    }

    fn build_snapshot(
        &self,
        session: &Session,
        recenter: Option<&str>,
    ) -> Result<ViewSnapshot, askama::Error> {
        let selection = &session.selection;
        let details_html = DetailsTemplate {
            details: session.details.clone(),
        }
        .render()?;

        let recenter = recenter
            .and_then(|id| self.catalog.get(id))
            .map(|stop| MapTarget {
                lat: stop.lat,
                lng: stop.lng,
                zoom: self.map.focus_zoom,
            });

        Ok(ViewSnapshot {
            filters: selection.filters(),
            active_stop_id: selection.active_stop_id().map(str::to_string),
            markers: MarkerView::project(&self.catalog, selection),
            options: StopOptionsView::project(&self.catalog, selection),
            details_html,
            recenter,
        })
    }
}
