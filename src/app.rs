//! HTTP API routes and request handlers.

use crate::app_state::SharedAppState;
use crate::error::FloodcastError;
use crate::metrics::{metrics_handler, record_response_metrics, request_counter};
use crate::models;
use crate::query::timestamp;
use crate::validated_json::ValidatedJson;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The axum service used to handle requests.
pub type Service = Router;

/// Return the fully configured [Service] for the given application state.
pub fn service(state: SharedAppState) -> Service {
    fn api() -> Router<SharedAppState> {
        Router::new()
            .route("/health", get(health))
            .route("/risk-zones", get(risk_zones))
            .route("/risk-analysis", get(risk_analysis))
            .route("/impact-data", get(impact_data))
            .route("/alerts", get(alerts))
            .route("/statistics", get(statistics))
            .route("/district/:name", get(district))
            .route("/rainfall-data", get(rainfall_data))
            .route("/search", post(search))
            .route("/refresh", post(refresh))
    }

    Router::new()
        .nest("/api", api())
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .on_request(request_counter)
                        .on_response(record_response_metrics),
                )
                // The dashboard frontend is served from a different origin.
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<models::Health> {
    Json(models::Health {
        status: "running".to_string(),
        message: "Flood Cascade System Backend".to_string(),
        timestamp: timestamp(),
    })
}

/// Current critical zones.
async fn risk_zones(State(state): State<SharedAppState>) -> Json<models::RiskZones> {
    Json(state.query.current_risk_zones())
}

/// Full risk analysis.
async fn risk_analysis(State(state): State<SharedAppState>) -> Json<models::RiskAnalysis> {
    Json(state.query.risk_analysis())
}

/// Impact metrics.
async fn impact_data(State(state): State<SharedAppState>) -> Json<models::ImpactData> {
    Json(state.query.impact_data())
}

/// Alerts derived from the risk analysis.
async fn alerts(State(state): State<SharedAppState>) -> Json<models::Alerts> {
    Json(state.query.alerts())
}

/// Aggregate counts and dataset descriptors.
async fn statistics(State(state): State<SharedAppState>) -> Json<models::Statistics> {
    Json(state.query.statistics())
}

/// Normals for one district, matched case-insensitively.
async fn district(
    State(state): State<SharedAppState>,
    Path(name): Path<String>,
) -> Result<Json<models::DistrictData>, FloodcastError> {
    // District keys are stored upper-cased, so the path segment is normalised
    // here; the store lookup itself is exact.
    state.query.district_data(&name.to_uppercase()).map(Json)
}

/// Aggregate dashboard payload.
async fn rainfall_data(State(state): State<SharedAppState>) -> Json<models::RainfallData> {
    Json(state.query.rainfall_data())
}

/// Filtered risk analysis query.
async fn search(
    State(state): State<SharedAppState>,
    ValidatedJson(request): ValidatedJson<models::SearchRequest>,
) -> Json<models::SearchResults> {
    Json(state.query.search(request))
}

/// Force a reload of the source data files.
async fn refresh(
    State(state): State<SharedAppState>,
) -> Result<Json<models::RefreshOutcome>, FloodcastError> {
    state.query.reload()?;
    Ok(Json(models::RefreshOutcome {
        status: "success".to_string(),
        message: "Data refreshed successfully".to_string(),
        timestamp: timestamp(),
    }))
}
