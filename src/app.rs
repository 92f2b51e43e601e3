#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::chart::Chart;
use crate::downloader;
use crate::error::DashboardError;
use crate::filter::{Filter, FilterOptions};
use crate::graph::{self, GraphOptions};
use crate::record::Table;
use crate::table::DisplayTable;
use crate::views::{self, Drilldown, Metric, Report, View, ViewReport};

pub struct AppState {
    table: Arc<Table>,
}

/// Sidebar filters and drill-down values, as they arrive on the query string.
#[derive(Deserialize, Debug, Default)]
struct ViewQuery {
    year_min: Option<i32>,
    year_max: Option<i32>,
    country: Option<String>,
    /// Comma separated.
    circuits: Option<String>,
    year: Option<i32>,
    race: Option<String>,
    driver: Option<String>,
    constructor: Option<String>,
    /// `csv` or `xlsx`, for downloads.
    format: Option<String>,
    /// Which table to write when exporting CSV.
    table: Option<usize>,
}

impl ViewQuery {
    fn filter(&self, table: &Table) -> Filter {
        let circuits = self
            .circuits
            .as_deref()
            .map(|c| c.split(',').collect::<Vec<_>>())
            .unwrap_or_default();
        Filter::from_sidebar(
            table,
            self.year_min,
            self.year_max,
            self.country.as_deref(),
            circuits,
        )
    }

    fn drilldown(&self) -> Drilldown {
        let given = |value: &Option<String>| value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(String::from);
        Drilldown {
            year: self.year,
            race: given(&self.race),
            driver: given(&self.driver),
            constructor: given(&self.constructor),
        }
    }
}

#[derive(Serialize)]
struct ViewResponse {
    status: &'static str,
    view: &'static str,
    title: &'static str,
    metrics: Vec<Metric>,
    tables: Vec<DisplayTable>,
    charts: Vec<Chart>,
    report: ViewReport,
}

#[derive(Serialize)]
struct RacesResponse {
    years: Vec<i32>,
    year: Option<i32>,
    races: Vec<String>,
}

#[derive(Serialize)]
struct NoticeResponse {
    status: &'static str,
    notice: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, tag) = match &self {
            DashboardError::NoDataForFilter(_) => (StatusCode::OK, "no_data"),
            DashboardError::UnknownView(_) => (StatusCode::NOT_FOUND, "error"),
            DashboardError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "error"),
            DashboardError::DataUnavailable { .. } | DashboardError::Render(_) | DashboardError::Export(_) => {
                error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "error")
            }
        };
        let body = NoticeResponse {
            status: tag,
            notice: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the dashboard router over an already loaded table.
///
/// # Arguments
/// * `table` - The shared, cached results table
///
/// # Returns
/// * A router serving the static page and the JSON, SVG and download API
pub fn router(table: Arc<Table>) -> Router {
    let app_state = Arc::new(AppState { table });

    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/options", get(get_options))
        .route("/api/races", get(get_races))
        .route("/api/views/:view", get(get_view))
        .route("/api/charts/:view/:index", get(get_chart))
        .route("/api/export/:view", get(export_view))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Serve the dashboard until the process is stopped.
pub async fn run(table: Arc<Table>, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(table);

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn get_options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(FilterOptions::from_table(&state.table))
}

async fn get_races(
    Query(params): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let filtered = state.table.filter(&params.filter(&state.table));
    let years = views::race_years(&filtered);
    let year = params.year.or_else(|| years.first().copied());
    let races = year.map(|y| views::races_in_year(&filtered, y)).unwrap_or_default();

    Json(RacesResponse { years, year, races })
}

fn run_view(state: &AppState, view: &str, params: &ViewQuery) -> Result<(View, ViewReport), DashboardError> {
    let view: View = view.parse()?;
    let filtered = state.table.filter(&params.filter(&state.table));
    let report = views::run(view, &filtered, &params.drilldown())?;
    Ok((view, report))
}

async fn get_view(
    Path(view): Path<String>,
    Query(params): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ViewResponse>, DashboardError> {
    let (view, report) = run_view(&state, &view, &params)?;

    Ok(Json(ViewResponse {
        status: "ok",
        view: view.slug(),
        title: view.title(),
        metrics: report.metrics(),
        tables: report.display_tables(),
        charts: report.charts(),
        report,
    }))
}

async fn get_chart(
    Path((view, index)): Path<(String, usize)>,
    Query(params): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let (view, report) = run_view(&state, &view, &params)?;
    let charts = report.charts();
    let chart = charts.get(index).ok_or_else(|| {
        DashboardError::InvalidParameter(format!("{} has {} charts, no chart {}", view, charts.len(), index))
    })?;

    let svg = graph::render_svg(chart, &GraphOptions::default())?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn export_view(
    Path(view): Path<String>,
    Query(params): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let (view, report) = run_view(&state, &view, &params)?;
    let tables = report.display_tables();

    match params.format.as_deref().unwrap_or("csv") {
        "csv" => {
            let index = params.table.unwrap_or(0);
            let table = tables.get(index).ok_or_else(|| {
                DashboardError::InvalidParameter(format!("{} has {} tables, no table {}", view, tables.len(), index))
            })?;
            let csv = downloader::to_csv(table)?;
            let disposition = format!("attachment; filename=\"{}.csv\"", downloader::file_stem(&table.title));
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        "xlsx" => {
            let bytes = downloader::to_xlsx(&tables)?;
            let disposition = format!("attachment; filename=\"{}.xlsx\"", view.slug());
            Ok((
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        other => Err(DashboardError::InvalidParameter(format!(
            "unsupported export format: {}",
            other
        ))),
    }
}
