use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use axum_extra::extract::WithRejection;

use crate::error::AppError;
use crate::models::{LoginRequest, RegisterRequest, RegisteredUser, SubscriptionTier, UserInfo};
use crate::services::UserService;

pub fn user_routes(user_service: UserService) -> Router {
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
        .with_state(user_service)
}

/// Register a new account on the ad-supported tier
pub async fn register(
    State(service): State<UserService>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<RegisteredUser>), AppError> {
    let user = service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
            subscription: SubscriptionTier::AdSupported.as_str().to_string(),
        }),
    ))
}

pub async fn login(
    State(service): State<UserService>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<Json<UserInfo>, AppError> {
    let user = service.login(request).await?;
    Ok(Json(UserInfo::from(user)))
}
