//! Local HTTP server for the flight board page.
//!
//! Routes:
//! - `GET /` renders the page from the current snapshot
//! - `POST /filter` selects `all` or one of the dropdown airports (form
//!   field `airport`)
//! - `POST /refresh` starts a refresh cycle
//! - `POST /theme` toggles the theme
//! - `GET /api/flights` returns the visible rows as JSON
//!
//! Every POST answers with a 303 redirect back to `/`.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::filter::AirportFilter;
use crate::lookup::is_known_airport;
use crate::render::{render_page, visible_rows, TableRow};
use crate::state::{FetchPhase, Theme};

#[derive(Debug, Deserialize)]
struct FilterForm {
    airport: String,
}

/// Body of `GET /api/flights`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlightsView {
    /// Fetch lifecycle phase.
    pub phase: FetchPhase,
    /// Selected filter value.
    pub filter: AirportFilter,
    /// Current theme.
    pub theme: Theme,
    /// Locale-formatted time of the last successful refresh.
    pub last_updated: Option<String>,
    /// Rows currently shown in the table.
    pub rows: Vec<TableRow>,
}

/// Build the page router around `dashboard`.
pub fn router(dashboard: Dashboard) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/filter", post(set_filter))
        .route("/refresh", post(refresh))
        .route("/theme", post(toggle_theme))
        .route("/api/flights", get(flights))
        .with_state(dashboard)
}

async fn page(State(dashboard): State<Dashboard>) -> Html<String> {
    let state = dashboard.snapshot().await;
    Html(render_page(&state, dashboard.offset()))
}

async fn set_filter(State(dashboard): State<Dashboard>, Form(form): Form<FilterForm>) -> Response {
    let filter = match form.airport.parse::<AirportFilter>() {
        Ok(filter) => filter,
        Err(e) => {
            warn!(error = %e, "rejected filter");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    // Only values the dropdown can show as selected
    if let AirportFilter::Airport(code) = &filter {
        if !is_known_airport(code) {
            warn!(%code, "rejected filter for unlisted airport");
            return (StatusCode::BAD_REQUEST, format!("unknown airport: {code}")).into_response();
        }
    }
    dashboard.set_filter(filter).await;
    Redirect::to("/").into_response()
}

async fn refresh(State(dashboard): State<Dashboard>) -> Redirect {
    dashboard.spawn_refresh();
    Redirect::to("/")
}

async fn toggle_theme(State(dashboard): State<Dashboard>) -> Redirect {
    dashboard.toggle_theme().await;
    Redirect::to("/")
}

async fn flights(State(dashboard): State<Dashboard>) -> Json<FlightsView> {
    let state = dashboard.snapshot().await;
    let rows = visible_rows(state.flights(), state.filter(), dashboard.offset());
    Json(FlightsView {
        phase: state.phase(),
        filter: state.filter().clone(),
        theme: state.theme(),
        last_updated: state.last_updated().map(str::to_string),
        rows,
    })
}

/// Start the board: kick off the first refresh cycle and return its router.
///
/// Page loads never fetch; after this only `POST /refresh` starts a cycle.
pub fn start(dashboard: Dashboard) -> Router {
    dashboard.spawn_refresh();
    router(dashboard)
}

/// Serve the page on an already bound `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    dashboard: Dashboard,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let local = listener.local_addr()?;
    info!("serving flight board on http://{local}");

    axum::serve(listener, start(dashboard))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Serve the page on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(dashboard: Dashboard, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    serve_on(listener, dashboard, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await
}
