//! Pass-through endpoints for the scraper process.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use common::AppResult;
use domain::{ScraperHealth, ScraperState};

pub fn scraper_routes() -> Router<AppState> {
    Router::new()
        .route("/start_scraper", post(start_scraper))
        .route("/scraper_health", get(scraper_health))
        .route("/scraper_state", get(scraper_state))
}

/// Trigger a scraper run
#[utoipa::path(
    post,
    path = "/v1/start_scraper",
    tag = "Scraper",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "State reported by the scraper", body = ScraperState),
        (status = 502, description = "Scraper unreachable or misbehaving")
    )
)]
pub async fn start_scraper(State(state): State<AppState>) -> AppResult<Json<ScraperState>> {
    Ok(Json(state.scraper.trigger().await?))
}

/// Liveness of the scraper process
#[utoipa::path(
    get,
    path = "/v1/scraper_health",
    tag = "Scraper",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scraper health", body = ScraperHealth),
        (status = 502, description = "Scraper unreachable or misbehaving")
    )
)]
pub async fn scraper_health(State(state): State<AppState>) -> AppResult<Json<ScraperHealth>> {
    Ok(Json(state.scraper.health_check().await?))
}

/// Whether the scraper is idle or mid-run
#[utoipa::path(
    get,
    path = "/v1/scraper_state",
    tag = "Scraper",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current scraper state", body = ScraperState),
        (status = 502, description = "Scraper unreachable or misbehaving")
    )
)]
pub async fn scraper_state(State(state): State<AppState>) -> AppResult<Json<ScraperState>> {
    Ok(Json(state.scraper.state().await?))
}
