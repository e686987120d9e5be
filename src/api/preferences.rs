use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{UpsertPreferenceRequest, UserPreference};
use crate::services::PreferenceService;
use crate::store::SharedStore;

pub fn preference_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", post(upsert_preferences).put(upsert_preferences))
        .route("/:user_id", get(get_preferences))
        .with_state(PreferenceService::new(store))
}

pub async fn upsert_preferences(
    State(service): State<PreferenceService>,
    WithRejection(Json(request), _): WithRejection<Json<UpsertPreferenceRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    service.upsert(request).await?;
    Ok(Json(json!({ "message": "Preferences saved" })))
}

pub async fn get_preferences(
    State(service): State<PreferenceService>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<UserPreference>, AppError> {
    let preference = service.get(user_id).await?;
    Ok(Json(preference))
}
