use axum::{extract::State, response::Json, routing::post, Router};
use axum_extra::extract::WithRejection;
use chrono::Local;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{DailyAd, DailyAdRequest};
use crate::services::AdService;
use crate::store::SharedStore;

pub fn ad_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/daily", post(get_daily_ad))
        .with_state(AdService::new(store))
}

/// Today's ad for an ad-supported user, or a message when none is due
pub async fn get_daily_ad(
    State(service): State<AdService>,
    WithRejection(Json(request), _): WithRejection<Json<DailyAdRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let user_id = request
        .user_id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation("user_id is required"))?;

    let today = Local::now().date_naive();
    let body = match service.serve_daily_ad(user_id, today).await? {
        DailyAd::Served { ad, served_on } => json!({ "ad": ad, "served_on": served_on }),
        DailyAd::AlreadyServed => json!({ "message": "Today's ad has already been shown" }),
        DailyAd::NoAdsNeeded => json!({ "message": "No ads for premium subscribers" }),
    };

    Ok(Json(body))
}
