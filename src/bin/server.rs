use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use window_estimator::calculator::{
    BAR_LENGTH, Calculator, CalculatorConfig, DEFAULT_MARGIN_PERCENT, KERF,
};
use window_estimator::catalog::Catalog;
use window_estimator::pieces::{FamilyPlan, plan_cutting};
use window_estimator::project::{Quote, WindowProject, margin_from_percent};
use window_estimator::solver::optimize;
use window_estimator::types::{CuttingPiece, Solution};

struct AppState {
    catalog: Catalog,
}

#[derive(Deserialize, Serialize)]
struct QuoteRequest {
    windows: Vec<WindowProject>,
    /// Percent.
    #[serde(default = "default_margin")]
    margin: f64,
    #[serde(default)]
    config: CalculatorConfig,
}

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    pieces: Vec<CuttingPiece>,
    #[serde(default = "default_bar_length")]
    bar_length: f64,
    #[serde(default = "default_kerf")]
    kerf: f64,
}

#[derive(Deserialize, Serialize)]
struct CuttingPlanRequest {
    windows: Vec<WindowProject>,
    #[serde(default = "default_kerf")]
    kerf: f64,
    #[serde(default)]
    config: CalculatorConfig,
}

#[derive(Serialize)]
struct OptimizeResponse {
    #[serde(flatten)]
    solution: Solution,
    bar_count: usize,
    waste_percent: f64,
    average_efficiency: f64,
}

impl From<Solution> for OptimizeResponse {
    fn from(solution: Solution) -> Self {
        Self {
            bar_count: solution.bar_count(),
            waste_percent: solution.total_waste_percent(),
            average_efficiency: solution.average_efficiency(),
            solution,
        }
    }
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN_PERCENT
}

fn default_bar_length() -> f64 {
    BAR_LENGTH
}

fn default_kerf() -> f64 {
    KERF
}

type ApiError = (StatusCode, String);

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

async fn quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Quote>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /quote"
    );

    if !(0.0..=100.0).contains(&req.margin) {
        return Err(bad_request(format!(
            "margin must be between 0 and 100, got {}",
            req.margin
        )));
    }
    if req.config.bar_length <= 0.0 {
        return Err(bad_request("bar length must be positive"));
    }

    let calculator = Calculator::new(&state.catalog, req.config);
    let quote = Quote::build(&req.windows, margin_from_percent(req.margin), &calculator);
    Ok(Json(quote))
}

async fn optimize_pieces(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let solution = optimize(req.pieces, req.bar_length, req.kerf).map_err(bad_request)?;
    Ok(Json(solution.into()))
}

async fn cutting_plan(
    Json(req): Json<CuttingPlanRequest>,
) -> Result<Json<Vec<FamilyPlan>>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /cutting-plan"
    );

    let plans = plan_cutting(&req.windows, req.kerf, &req.config).map_err(bad_request)?;
    Ok(Json(plans))
}

fn load_catalog() -> Catalog {
    let Ok(path) = std::env::var("CATALOG_PATH") else {
        return Catalog::default();
    };
    match Catalog::load(&path) {
        Ok(catalog) => {
            tracing::info!(path = %path, materials = catalog.records().len(), "catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "failed to load catalog, using fallback prices");
            Catalog::default()
        }
    }
}

fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
        .block_on(serve());
}

async fn serve() {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");
    let state = Arc::new(AppState {
        catalog: load_catalog(),
    });

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/quote", post(quote))
        .route("/optimize", post(optimize_pieces))
        .route("/cutting-plan", post(cutting_plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
