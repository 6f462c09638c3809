//! Uniform `{ success, data?, error? }` envelope for every JSON endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// Failure variant carrying extra structured fields next to the message,
/// used for compliance blocks that include a remediation `action_url`.
pub fn failure_with(
    status: StatusCode,
    message: impl Into<String>,
    extra: serde_json::Value,
) -> Response {
    let mut body = json!({ "success": false, "error": message.into() });
    if let (Some(map), serde_json::Value::Object(extra)) = (body.as_object_mut(), extra) {
        for (key, value) in extra {
            map.insert(key, value);
        }
    }
    (status, Json(body)).into_response()
}
