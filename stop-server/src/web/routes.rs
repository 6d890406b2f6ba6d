//! HTTP route handlers.
//!
//! Each mutating endpoint applies exactly one selection transition under the
//! session lock and answers with the fresh view, so the page never sees a
//! half-applied change.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::selection::{FilterOutcome, SelectOutcome};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/details", get(details_fragment))
        .route("/api/view", get(current_view))
        .route("/api/select", post(select_stop))
        .route("/api/filter", post(set_filter))
        .route("/api/clear", post(clear_selection))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The page, drawn with a fresh details projection.
async fn index_page(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    let now = state.now();
    let mut session = state.session.write().await;
    session.refresh_details(&state.catalog, now);

    let view = state.snapshot(&mut session)?;
    let page = PageData {
        map: &state.map,
        refresh_ms: u64::try_from(state.refresh_interval.as_millis()).unwrap_or(u64::MAX),
        view: &view,
    };
    let page_json = serde_json::to_string(&page).map_err(|e| AppError::Internal {
        message: format!("Failed to encode page data: {e}"),
    })?;

    Ok(IndexTemplate {
        filters: view.filters,
        options: view.options.clone(),
        details: session.details().clone(),
        page_json,
    })
}

/// The details panel, re-projected at the current minute.
async fn details_fragment(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = state.now();
    let mut session = state.session.write().await;
    session.refresh_details(&state.catalog, now);

    let html = DetailsTemplate {
        details: session.details().clone(),
    }
    .render()?;
    Ok(Html(html))
}

/// The current view. Re-projects the details panel but leaves the selection
/// and any pending recenter untouched.
async fn current_view(State(state): State<AppState>) -> Result<Json<ViewSnapshot>, AppError> {
    let now = state.now();
    let mut session = state.session.write().await;
    session.refresh_details(&state.catalog, now);

    Ok(Json(state.peek_snapshot(&session)?))
}

/// Select a stop from a marker or the list.
///
/// Unknown and hidden stops leave the selection as it was; the response is
/// still the current view.
async fn select_stop(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let now = state.now();
    let mut session = state.session.write().await;

    match session.select(&req.stop_id, req.origin, &state.catalog, now) {
        SelectOutcome::Selected => {
            info!(stop = %req.stop_id, origin = ?req.origin, "stop selected")
        }
        outcome => warn!(stop = %req.stop_id, ?outcome, "selection ignored"),
    }

    Ok(Json(state.snapshot(&mut session)?))
}

/// Toggle one exit side.
async fn set_filter(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<ViewSnapshot>, AppError> {
    let now = state.now();
    let mut session = state.session.write().await;

    let outcome = session.set_filter(req.side, req.enabled, &state.catalog, now);
    let cleared = outcome == FilterOutcome::Cleared;
    info!(side = %req.side, enabled = req.enabled, cleared, "filter set");

    Ok(Json(state.snapshot(&mut session)?))
}

/// Drop the active stop.
async fn clear_selection(State(state): State<AppState>) -> Result<Json<ViewSnapshot>, AppError> {
    let mut session = state.session.write().await;
    session.clear();
    info!("selection cleared");

    Ok(Json(state.snapshot(&mut session)?))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
