//! Result endpoints.
//!
//! - `GET /api/sessions/:id/result`: last report and the received JSON
//! - `GET /api/sessions/:id/result/download`: `risk_assessment.json`

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::assessment::Assessment;
use crate::report::AssessmentReport;

/// File name offered for the downloaded result.
pub const ARTIFACT_FILE_NAME: &str = "risk_assessment.json";

#[derive(Serialize)]
pub struct ResultResponse {
    pub report: AssessmentReport,
    /// The backend response exactly as received.
    pub result: serde_json::Value,
}

impl ResultResponse {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            report: AssessmentReport::build(&assessment.result),
            result: assessment.raw.clone(),
        }
    }
}

/// `GET /api/sessions/:id/result`
pub async fn latest(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultResponse>, ApiError> {
    let assessment = ctx.session(&id)?.last_assessment()?;
    Ok(Json(ResultResponse::from_assessment(&assessment)))
}

/// `GET /api/sessions/:id/result/download`
pub async fn download(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let assessment = ctx.session(&id)?.last_assessment()?;
    let artifact = assessment
        .to_artifact()
        .map_err(|e| ApiError::Internal(format!("artifact encoding failed: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{ARTIFACT_FILE_NAME}\""),
        )
        .body(Body::from(artifact))
        .map_err(|e| ApiError::Internal(format!("response build failed: {e}")))
}
