use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;

use crate::error::AppError;
use crate::models::{MealPlanResponse, PlanQuery, WorkoutPlanResponse};
use crate::services::PlanService;
use crate::store::SharedStore;

pub fn plan_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/workouts", get(get_workout_plan))
        .route("/meals", get(get_meal_plan))
        .with_state(PlanService::new(store))
}

/// Workout plan grouped as `day_N`, days ascending
pub async fn get_workout_plan(
    State(service): State<PlanService>,
    WithRejection(Query(query), _): WithRejection<Query<PlanQuery>, AppError>,
) -> Result<Json<WorkoutPlanResponse>, AppError> {
    let plan = service.workout_plan_for(&query).await?;
    Ok(Json(WorkoutPlanResponse::from(plan)))
}

pub async fn get_meal_plan(
    State(service): State<PlanService>,
    WithRejection(Query(query), _): WithRejection<Query<PlanQuery>, AppError>,
) -> Result<Json<MealPlanResponse>, AppError> {
    let plan = service.meal_plan_for(&query).await?;
    Ok(Json(MealPlanResponse::from(plan)))
}
