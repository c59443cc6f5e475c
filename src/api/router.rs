//! Form server router.
//!
//! `GET /` serves the page. The JSON API is nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Access logger (all routes) → 2. `no-store` cache control (API only)

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::page;
use crate::api::types::ApiContext;
use crate::assessment_client::RiskBackend;

/// Build the form server router around a risk backend.
pub fn form_router(backend: Arc<dyn RiskBackend>) -> Router {
    build_router(ApiContext::new(backend))
}

/// Build router from a pre-constructed `ApiContext`.
pub(crate) fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/form/defaults", get(endpoints::form::defaults))
        .route("/sessions", post(endpoints::sessions::create))
        .route("/sessions/:id", delete(endpoints::sessions::end))
        .route("/sessions/:id/status", get(endpoints::sessions::status))
        .route("/sessions/:id/analyze", post(endpoints::analyze::analyze))
        .route("/sessions/:id/result", get(endpoints::result::latest))
        .route(
            "/sessions/:id/result/download",
            get(endpoints::result::download),
        )
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::cache::no_store));

    Router::new()
        .route("/", get(page::form_page))
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use super::*;
    use crate::assessment_client::mock::MockRiskBackend;
    use crate::models::assessment::fixtures::sample_response;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_ctx(backend: Arc<dyn RiskBackend>) -> ApiContext {
        ApiContext::new(backend).with_today(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> serde_json::Value {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn new_session(app: &Router) -> String {
        let (status, _, body) = send(app, "POST", "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json(&body)["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn root_serves_form_page() {
        let app = form_router(Arc::new(MockRiskBackend::succeeding()));
        let (status, headers, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(String::from_utf8(body).unwrap().contains("Analyze Risk"));
    }

    #[tokio::test]
    async fn health_is_ok_and_not_cached() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let (status, headers, body) = send(&app, "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        let body = json(&body);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn form_defaults_carry_record_templates_and_choices() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let (status, _, body) = send(&app, "GET", "/api/form/defaults", None).await;
        assert_eq!(status, StatusCode::OK);

        let body = json(&body);
        let record = &body["record"];
        assert_eq!(record["current_medications"].as_array().unwrap().len(), 2);
        assert_eq!(record["allergies"].as_array().unwrap().len(), 1);
        assert_eq!(record["vitals"]["last_measured"], "2025-03-14");
        assert_eq!(record["proposed_drug"]["start_date"], "2025-03-14");
        assert_eq!(record["proposed_drug"]["name"], "Rosuvastatin");

        assert_eq!(body["templates"]["current_medications"]["route"], "oral");
        assert_eq!(body["choices"]["route"], serde_json::json!(["oral", "iv", "im"]));
        assert_eq!(
            body["choices"]["severity"],
            serde_json::json!(["mild", "moderate", "severe", "controlled"])
        );
    }

    #[tokio::test]
    async fn analyze_then_fetch_and_download_result() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let id = new_session(&app).await;

        let (status, headers, body) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/analyze"),
            Some("{}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        let analyzed = json(&body);
        assert_eq!(analyzed["report"]["overall"]["band"], "high");
        assert_eq!(analyzed["report"]["overall"]["score_percent"], 72.0);

        let (status, _, body) =
            send(&app, "GET", &format!("/api/sessions/{id}/result"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["result"], sample_response(72.0));

        let (status, headers, body) = send(
            &app,
            "GET",
            &format!("/api/sessions/{id}/result/download"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"risk_assessment.json\""
        );
        assert_eq!(json(&body), sample_response(72.0));
        assert!(String::from_utf8(body).unwrap().contains("\n  \"overall_risk\""));
    }

    #[tokio::test]
    async fn empty_medication_list_is_sent_as_empty_array() {
        let ctx = test_ctx(Arc::new(MockRiskBackend::succeeding()));
        let app = build_router(ctx.clone());
        let id = new_session(&app).await;

        let (status, _, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/analyze"),
            Some(r#"{"current_medications": []}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let session = ctx.session(&id.parse::<Uuid>().unwrap()).unwrap();
        let record = serde_json::to_value(session.last_record().unwrap()).unwrap();
        assert_eq!(record["current_medications"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn result_before_analysis_is_404() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let id = new_session(&app).await;

        let (status, _, body) =
            send(&app, "GET", &format!("/api/sessions/{id}/result"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"]["code"], "NO_RESULT");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/api/sessions/{}/analyze", Uuid::new_v4()),
            Some("{}"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn unsupported_enum_literal_is_rejected() {
        let backend = Arc::new(MockRiskBackend::succeeding());
        let app = build_router(test_ctx(backend.clone()));
        let id = new_session(&app).await;

        let (status, _, body) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/analyze"),
            Some(r#"{"proposed_drug": {"route": "topical"}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["error"]["code"], "BAD_REQUEST");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn backend_failure_is_502_and_keeps_previous_result() {
        let ctx = test_ctx(Arc::new(MockRiskBackend::succeeding()));
        let app = build_router(ctx.clone());
        let id = new_session(&app).await;
        let (status, _, _) = send(
            &app,
            "POST",
            &format!("/api/sessions/{id}/analyze"),
            Some("{}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Same session store, backend now unreachable.
        let mut failing = ctx.clone();
        failing.backend = Arc::new(MockRiskBackend::unreachable());
        let failing_app = build_router(failing);

        let (status, _, body) = send(
            &failing_app,
            "POST",
            &format!("/api/sessions/{id}/analyze"),
            Some("{}"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json(&body)["error"]["code"], "BACKEND_UNAVAILABLE");

        let (status, _, body) =
            send(&app, "GET", &format!("/api/sessions/{id}/status"), None).await;
        assert_eq!(status, StatusCode::OK);
        let status_body = json(&body);
        assert_eq!(status_body["in_flight"], false);
        assert_eq!(status_body["has_result"], true);

        let (_, _, body) = send(&app, "GET", &format!("/api/sessions/{id}/result"), None).await;
        assert_eq!(json(&body)["result"], sample_response(72.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn second_analyze_while_in_flight_is_409() {
        let gate = Arc::new(Barrier::new(2));
        let backend = Arc::new(MockRiskBackend::succeeding().gated(Arc::clone(&gate)));
        let app = build_router(test_ctx(backend.clone()));
        let id = new_session(&app).await;
        let uri = format!("/api/sessions/{id}/analyze");

        let first = {
            let app = app.clone();
            let uri = uri.clone();
            tokio::spawn(async move { send(&app, "POST", &uri, Some("{}")).await })
        };

        // Wait until the backend has been entered.
        let g = Arc::clone(&gate);
        tokio::task::spawn_blocking(move || g.wait()).await.unwrap();

        let (status, _, body) = send(&app, "POST", &uri, Some("{}")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json(&body)["error"]["code"], "ANALYSIS_IN_PROGRESS");

        let (_, _, body) = send(&app, "GET", &format!("/api/sessions/{id}/status"), None).await;
        assert_eq!(json(&body)["in_flight"], true);

        let g = Arc::clone(&gate);
        tokio::task::spawn_blocking(move || g.wait()).await.unwrap();

        let (status, _, _) = first.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let id = new_session(&app).await;

        let (status, _, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) =
            send(&app, "GET", &format!("/api/sessions/{id}/status"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build_router(test_ctx(Arc::new(MockRiskBackend::succeeding())));
        let (status, _, _) = send(&app, "GET", "/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
