//! Session lifecycle endpoints.
//!
//! - `POST /api/sessions`: start a session
//! - `DELETE /api/sessions/:id`: end it and drop its state
//! - `GET /api/sessions/:id/status`: in-flight flag and result presence

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::analysis_guard::ActiveSubmission;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub session_id: Uuid,
    pub created_at: String,
    pub in_flight: bool,
    pub current_submission: Option<ActiveSubmission>,
    pub has_result: bool,
}

/// `POST /api/sessions`
pub async fn create(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let session = ctx.sessions.create()?;
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id(),
            created_at: session.created_at().to_string(),
        }),
    ))
}

/// `DELETE /api/sessions/:id`
pub async fn end(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if ctx.sessions.remove(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound)
    }
}

/// `GET /api/sessions/:id/status`
pub async fn status(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionStatus>, ApiError> {
    let session = ctx.session(&id)?;
    Ok(Json(SessionStatus {
        session_id: session.id(),
        created_at: session.created_at().to_string(),
        in_flight: session.is_in_flight(),
        current_submission: session.current_submission(),
        has_result: session.last_assessment().is_ok(),
    }))
}
