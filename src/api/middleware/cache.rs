//! Cache-control middleware.

use axum::http::{header, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

/// API responses hold patient data: never cache them.
pub async fn no_store(req: Request<axum::body::Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
