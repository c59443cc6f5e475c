//! Analysis endpoint.
//!
//! `POST /api/sessions/:id/analyze` assembles the submitted fields into
//! a `PatientRecord`, sends it to the risk service and returns the
//! report. The backend call blocks, so it runs on the blocking pool.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::endpoints::result::ResultResponse;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::form::{assemble, FormSubmission};

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    payload: Result<Json<FormSubmission>, JsonRejection>,
) -> Result<Json<ResultResponse>, ApiError> {
    let Json(submission) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let session = ctx.session(&id)?;
    let record = assemble(&ctx.defaults(), submission);
    let backend = Arc::clone(&ctx.backend);

    let assessment =
        tokio::task::spawn_blocking(move || session.submit(backend.as_ref(), record))
            .await
            .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))??;

    Ok(Json(ResultResponse::from_assessment(&assessment)))
}
