use axum::{http::Uri, response::Json};
use modkit::api::problem::ProblemResponse;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timeUtc": chrono::Utc::now(),
    }))
}

/// Unknown routes answer with a problem document instead of an empty 404.
pub async fn not_found(uri: Uri) -> ProblemResponse {
    let mut resp = modkit::not_found(format!("No route for {}", uri.path()));
    resp.0.instance = uri.path().to_string();
    resp
}
