//! Periodic re-projection of the details panel.
//!
//! The countdown in the details panel goes stale as time passes. While a
//! stop is active, a background task re-projects it on a fixed period; with
//! no active stop each tick does nothing.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::format_minutes;

use super::state::AppState;

/// Re-project the details panel once. Returns whether a stop was active.
pub async fn refresh_details(state: &AppState) -> bool {
    let now = state.now();
    let mut session = state.session.write().await;
    if session.selection().active_stop_id().is_none() {
        return false;
    }

    let active = session.refresh_details(&state.catalog, now);
    debug!(now = %format_minutes(now), "refreshed details panel");
    active
}

/// Spawn the refresh loop on the current runtime.
pub fn spawn_details_refresh(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(state.refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            refresh_details(&state).await;
        }
    })
}
