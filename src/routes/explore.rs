use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::CardBuilder;
use crate::models::{ErrorResponse, ExploreRequest, ExploreResponse, HealthResponse};
use crate::services::SupabaseClient;

/// How many candidate rows to over-fetch per requested card, so ranking
/// has something to choose from.
const FETCH_MULTIPLIER: usize = 5;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub builder: CardBuilder,
    /// Hard cap on the per-request card count.
    pub max_limit: u16,
    /// Largest accepted search radius.
    pub max_radius_km: f64,
}

/// Configure all explore-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/explore/find", web::post().to(find_cards));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.supabase.health_check().await.unwrap_or(false);

    let status = if backend_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Build the explore feed
///
/// POST /api/v1/explore/find
///
/// Request body:
/// ```json
/// {
///   "preferences": { "location": {...}, "massageTypes": [...], ... },
///   "limit": 20
/// }
/// ```
async fn find_cards(
    state: web::Data<AppState>,
    req: web::Json<ExploreRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for explore request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap the limit to prevent excessive queries
    let limit = req.limit.min(state.max_limit) as usize;
    let prefs = &req.preferences;

    if prefs.location.radius_km > state.max_radius_km {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: format!("radiusKm must be at most {}", state.max_radius_km),
            status_code: 400,
        });
    }

    tracing::info!(
        "Building explore feed: {} massage types, mode {:?}, radius {} km, limit {}",
        prefs.massage_types.len(),
        prefs.mode,
        prefs.location.radius_km,
        limit
    );

    let rows = match state
        .supabase
        .fetch_therapists(&prefs.location, limit * FETCH_MULTIPLIER)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch therapist rows: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch therapists".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Fetched {} candidate rows", rows.len());

    let result = state.builder.build_cards(prefs, rows, limit);

    let response = ExploreResponse {
        total_candidates: result.total_candidates,
        cards: result.cards,
    };

    tracing::info!(
        "Returning {} cards (from {} candidates)",
        response.cards.len(),
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
