use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::{IdentifyMachineRequest, MachineGuide, MachineMatch};
use crate::services::MachineService;
use crate::store::SharedStore;

#[derive(Debug, Serialize)]
pub struct MachineGuideResponse {
    pub machine_name: String,
    pub primary_muscles: Vec<String>,
    pub cues: Vec<String>,
    pub instructions: Vec<String>,
    pub label: String,
}

impl From<MachineGuide> for MachineGuideResponse {
    fn from(guide: MachineGuide) -> Self {
        Self {
            machine_name: guide.machine_name,
            primary_muscles: guide.primary_muscles,
            cues: guide.cues,
            instructions: guide.instructions,
            label: guide.label,
        }
    }
}

pub fn machine_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/identify", post(identify_machine))
        .with_state(MachineService::new(store))
}

/// Identify a machine from classifier labels. A miss is a 404 carrying the
/// labels that were tried, so the client can retry with other candidates.
pub async fn identify_machine(
    State(service): State<MachineService>,
    WithRejection(Json(request), _): WithRejection<Json<IdentifyMachineRequest>, AppError>,
) -> Result<Response, AppError> {
    let outcome = service
        .identify(&request.labels, request.machine_name.as_deref())
        .await?;

    let response = match outcome {
        MachineMatch::Matched(guide) => Json(MachineGuideResponse::from(guide)).into_response(),
        MachineMatch::NoMatch { labels_tested } => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": "No exact match. Send the classifier's top labels to this endpoint.",
                "labels_tested": labels_tested,
            })),
        )
            .into_response(),
    };

    Ok(response)
}
