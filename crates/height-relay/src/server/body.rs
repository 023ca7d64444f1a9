use axum::body::Bytes;
use serde_json::{Map, Value};

use super::error::AppError;

/// Decode a JSON object request body. An empty body reads as `{}` so that
/// clients that send nothing get field-level errors rather than a parse error.
pub(super) fn json_object(body: &Bytes) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Malformed JSON request body".to_string(),
        )),
    }
}

/// Parse a `{height}` path segment. Only plain ASCII digits are accepted;
/// signs, whitespace and fractions are rejected.
pub(super) fn height_param(raw: &str) -> Result<u64, AppError> {
    let parsed = if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    };
    parsed.ok_or_else(|| {
        let message = "Missing integer as a request parameter";
        tracing::warn!(param = raw, "{message}");
        AppError::BadRequest(message.to_string())
    })
}

/// Read the required `height` field. Numeric strings are accepted the same
/// way as JSON numbers.
pub(super) fn height_field(body: &Map<String, Value>) -> Result<u64, AppError> {
    let Some(value) = body.get("height") else {
        let message = "Missing `height` in request body";
        tracing::warn!("{message}");
        return Err(AppError::BadRequest(message.to_string()));
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        AppError::BadRequest("Field `height` must be a non-negative integer".to_string())
    })
}
