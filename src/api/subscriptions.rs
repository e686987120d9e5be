use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use chrono::Local;

use crate::error::AppError;
use crate::models::{Subscription, SubscriptionUpdated, UpdateSubscriptionRequest};
use crate::services::SubscriptionService;
use crate::store::SharedStore;

pub fn subscription_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", post(update_subscription))
        .route("/:user_id", get(get_subscription))
        .with_state(SubscriptionService::new(store))
}

pub async fn update_subscription(
    State(service): State<SubscriptionService>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateSubscriptionRequest>, AppError>,
) -> Result<Json<SubscriptionUpdated>, AppError> {
    let today = Local::now().date_naive();
    let subscription = service
        .update(request.user_id, request.tier.as_deref(), today)
        .await?;

    Ok(Json(SubscriptionUpdated {
        message: "Subscription updated".to_string(),
        tier: subscription.tier,
        renewal_date: subscription.renewal_date,
    }))
}

pub async fn get_subscription(
    State(service): State<SubscriptionService>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = service.get(user_id).await?;
    Ok(Json(subscription))
}
