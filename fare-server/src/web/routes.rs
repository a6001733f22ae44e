//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::catalog::CatalogError;
use crate::domain::{FareBreakdown, FareRequest, ValidationError};
use crate::routing::resolve_distance;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/locations", get(list_locations))
        .route("/api/locations/search", get(search_locations))
        .route("/api/locations/stats", get(location_stats))
        .route("/api/locations/:index", get(location_by_index))
        .route("/api/calculate-fare", post(calculate_fare))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser frontend.
///
/// An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

async fn index() -> &'static str {
    "Hello from Bus Fare Calculator Backend!"
}

/// Health check endpoint.
///
/// The routing ping is answered from a short-lived cache, so this stays
/// fast while the routing backend is down.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.catalog.snapshot();
    let routing = state.routing.ping().await;

    let (status, locations) = match snapshot {
        Ok(s) if s.is_empty() => ("degraded", 0),
        Ok(s) => ("healthy", s.len()),
        Err(e) => {
            error!(error = %e, "Health check could not read catalog");
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        status,
        service: "bus-fare-backend",
        locations,
        routing,
    })
}

/// List every location in catalog order.
async fn list_locations(State(state): State<AppState>) -> Result<Json<LocationsResponse>, AppError> {
    let (locations, total) = state.catalog.all()?;
    Ok(Json(LocationsResponse { locations, total }))
}

/// Search locations by English or Bengali name.
async fn search_locations(
    State(state): State<AppState>,
    Query(req): Query<SearchLocationsRequest>,
) -> Result<Json<SearchLocationsResponse>, AppError> {
    let outcome = state
        .search
        .search(req.query(), req.language(), req.limit())?;
    Ok(Json(outcome.into()))
}

/// Catalog statistics.
async fn location_stats(
    State(state): State<AppState>,
) -> Result<Json<LocationStatsResponse>, AppError> {
    let total_locations = state.catalog.count()?;
    Ok(Json(LocationStatsResponse {
        total_locations,
        cache_status: "loaded",
    }))
}

/// A single location by its position in the catalog.
async fn location_by_index(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<crate::domain::LocationRecord>, AppError> {
    let not_found = || AppError::NotFound {
        message: format!("Location {index} not found"),
    };

    // Negative and non-numeric positions are simply outside the catalog
    let position: usize = index.parse().map_err(|_| not_found())?;
    state
        .catalog
        .by_index(position)?
        .map(Json)
        .ok_or_else(not_found)
}

/// Price a trip.
async fn calculate_fare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FareBreakdown>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: FareRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid fare request body");
        AppError::BadRequest {
            message: "Invalid request body".to_string(),
        }
    })?;

    let distance = resolve_distance(&req, state.routing.as_ref(), state.fallback_km).await;
    debug!(km = distance.km, source = ?distance.source, "Resolved fare distance");

    let breakdown = state.fares.calculate(&req, distance.km)?;
    Ok(Json(breakdown))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
