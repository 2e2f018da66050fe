// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use mt_calc_api::{
    ApiError, CalculationResponse, CourseNameNormalizer, CycleFilter, CycleListing,
    CycleOverrides, DEFAULT_ANALYSIS_YEAR, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, ImportedTable,
    ManualCalculationRequest, RecordCalculationRequest, TableCalculationResponse, YearPolicy,
    calculate_manual, calculate_record, calculate_table_row, import_table, list_cycles,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{error, info};

/// MT Calc Server - HTTP server for the total-enrollment-equivalence calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Analysis year offered to callers by default
    #[arg(long, default_value_t = DEFAULT_ANALYSIS_YEAR)]
    default_year: i32,

    /// Earliest accepted analysis year
    #[arg(long, default_value_t = DEFAULT_MIN_YEAR)]
    min_year: i32,

    /// Latest accepted analysis year
    #[arg(long, default_value_t = DEFAULT_MAX_YEAR)]
    max_year: i32,

    /// Path to a two-column CSV of course-name substitutions
    #[arg(long)]
    course_names: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// Every request is calculated independently; the state only carries
/// read-only configuration.
#[derive(Clone)]
struct AppState {
    /// The accepted analysis years.
    policy: YearPolicy,
    /// Course-name substitutions applied to imported tables.
    names: Arc<CourseNameNormalizer>,
}

/// API response listing the accepted analysis years.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct YearsApiResponse {
    /// The year offered by default.
    default_year: i32,
    /// Every accepted year, ascending.
    years: Vec<i32>,
}

/// API request for listing the cycles of an uploaded table.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TableCyclesApiRequest {
    /// The table exported as CSV.
    csv: String,
    /// The selections made so far.
    #[serde(default)]
    filter: CycleFilter,
}

/// API response for listing the cycles of an uploaded table.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TableCyclesApiResponse {
    /// Rows kept after import.
    rows: usize,
    /// Rows dropped for lacking a course name.
    dropped_rows: usize,
    /// The selection state under the filter.
    #[serde(flatten)]
    listing: CycleListing,
}

/// API request for calculating one row of an uploaded table.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TableCalculationApiRequest {
    /// The table exported as CSV.
    csv: String,
    /// The row to calculate.
    row_number: usize,
    /// Edits applied on top of the row.
    #[serde(default)]
    overrides: CycleOverrides,
    /// The analysis year.
    #[serde(default)]
    year: Option<i32>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::InvalidTableFormat { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Returns the current UTC date, used for missing cycle dates.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for GET `/years` endpoint.
///
/// Lists the accepted analysis years.
async fn handle_list_years(
    AxumState(app_state): AxumState<AppState>,
) -> Json<YearsApiResponse> {
    info!("Handling list_years request");

    Json(YearsApiResponse {
        default_year: app_state.policy.default_year,
        years: app_state.policy.years(),
    })
}

/// Handler for POST `/calculate` endpoint.
///
/// Calculates a cycle whose inputs are all supplied explicitly.
async fn handle_calculate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ManualCalculationRequest>,
) -> Result<Json<CalculationResponse>, HttpError> {
    info!(year = ?req.year, "Handling calculate request");

    let response: CalculationResponse = calculate_manual(&req, &app_state.policy, today())?;

    Ok(Json(response))
}

/// Handler for POST `/records/calculate` endpoint.
///
/// Calculates a cycle from a raw source record.
async fn handle_calculate_record(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RecordCalculationRequest>,
) -> Result<Json<CalculationResponse>, HttpError> {
    info!(
        year = ?req.year,
        fields = req.record.len(),
        "Handling calculate_record request"
    );

    let response: CalculationResponse = calculate_record(&req, &app_state.policy, today())?;

    Ok(Json(response))
}

/// Handler for POST `/tables/cycles` endpoint.
///
/// Imports an uploaded table and lists its selectable cycles.
async fn handle_list_table_cycles(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TableCyclesApiRequest>,
) -> Result<Json<TableCyclesApiResponse>, HttpError> {
    info!(
        campus = ?req.filter.campus,
        course_type = ?req.filter.course_type,
        course_name = ?req.filter.course_name,
        "Handling list_table_cycles request"
    );

    let table: ImportedTable = import_table(&req.csv, &app_state.names)?;
    let listing: CycleListing = list_cycles(&table, &req.filter, &app_state.names);

    Ok(Json(TableCyclesApiResponse {
        rows: table.len(),
        dropped_rows: table.dropped_rows,
        listing,
    }))
}

/// Handler for POST `/tables/calculate` endpoint.
///
/// Imports an uploaded table and calculates one of its rows.
async fn handle_calculate_table_row(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TableCalculationApiRequest>,
) -> Result<Json<TableCalculationResponse>, HttpError> {
    info!(
        row_number = req.row_number,
        year = ?req.year,
        "Handling calculate_table_row request"
    );

    let table: ImportedTable = import_table(&req.csv, &app_state.names)?;
    let response: TableCalculationResponse = calculate_table_row(
        &table,
        req.row_number,
        &req.overrides,
        req.year,
        &app_state.policy,
        today(),
    )?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/years", get(handle_list_years))
        .route("/calculate", post(handle_calculate))
        .route("/records/calculate", post(handle_calculate_record))
        .route("/tables/cycles", post(handle_list_table_cycles))
        .route("/tables/calculate", post(handle_calculate_table_row))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing MT Calc Server");

    let policy: YearPolicy = YearPolicy::new(args.min_year, args.max_year, args.default_year)?;
    info!(
        min_year = policy.min_year,
        max_year = policy.max_year,
        default_year = policy.default_year,
        "Accepted analysis years"
    );

    let names: CourseNameNormalizer = match &args.course_names {
        Some(path) => CourseNameNormalizer::load_optional(path)?,
        None => {
            info!("No course-name dictionary configured");
            CourseNameNormalizer::new()
        }
    };

    let app_state: AppState = AppState {
        policy,
        names: Arc::new(names),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {addr}");

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
