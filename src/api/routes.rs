use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::ads::ad_routes;
use super::health::health_check;
use super::machines::machine_routes;
use super::middleware::{cors_layer, security_headers_layer};
use super::plans::plan_routes;
use super::preferences::preference_routes;
use super::subscriptions::subscription_routes;
use super::users::user_routes;
use crate::services::UserService;
use crate::store::SharedStore;

pub fn create_routes(store: SharedStore, bcrypt_cost: u32) -> Router {
    let user_service = UserService::with_bcrypt_cost(store.clone(), bcrypt_cost);

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(user_routes(user_service))
        .nest("/preferences", preference_routes(store.clone()))
        .nest("/plan", plan_routes(store.clone()))
        .nest("/machines", machine_routes(store.clone()))
        .nest("/subscription", subscription_routes(store.clone()))
        .nest("/ads", ad_routes(store));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(security_headers_layer())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
