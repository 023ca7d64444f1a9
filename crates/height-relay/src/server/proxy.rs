use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;

use height_relay_core::types::PlainText;
use height_relay_core::BlockInfo;

use super::body::{height_param, json_object};
use super::error::{internal_error, AppError};
use super::SharedState;

const DEFAULT_TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub(super) async fn latest_block_height(
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    let text = state
        .provider
        .latest_height()
        .await
        .map_err(|e| internal_error(e, "Internal server error; failed in outside call"))?;
    Ok(passthrough(text))
}

pub(super) async fn current_difficulty(
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    let text = state
        .provider
        .current_difficulty()
        .await
        .map_err(|e| internal_error(e, "unable to get difficulty"))?;
    Ok(passthrough(text))
}

/// Reshape the provider's block at `height` into `header` and `info`.
/// `difficulty` is taken from the request body as-is.
pub(super) async fn block_info(
    State(state): State<SharedState>,
    Path(raw_height): Path<String>,
    body: Bytes,
) -> Result<Json<BlockInfo>, AppError> {
    let height = height_param(&raw_height)?;
    let difficulty = json_object(&body)?.remove("difficulty");

    let block = state
        .provider
        .block_at_height(height)
        .await
        .map_err(|e| internal_error(e, "Internal server error"))?;

    Ok(Json(BlockInfo::from_upstream(block, difficulty)))
}

fn passthrough(text: PlainText) -> Response {
    let content_type = text
        .content_type
        .unwrap_or_else(|| DEFAULT_TEXT_CONTENT_TYPE.to_string());
    ([(CONTENT_TYPE, content_type)], text.body).into_response()
}
