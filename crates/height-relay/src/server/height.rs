use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use height_relay_core::types::ReplaceOutcome;
use height_relay_core::BlockHeightRecord;

use super::body::{height_field, height_param, json_object};
use super::error::{internal_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Serialize)]
pub(super) struct InstantiateResponse {
    message: &'static str,
    height: u64,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn get_current_height(
    State(state): State<SharedState>,
) -> Result<Json<BlockHeightRecord>, AppError> {
    let record = state
        .store
        .current()
        .await
        .map_err(|e| internal_error(e, "Something went wrong in current-height-db"))?;

    record
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No block height recorded".to_string()))
}

/// Leave exactly one record holding `height`. The response is sent once the
/// store write has settled.
pub(super) async fn delete_and_instantiate(
    State(state): State<SharedState>,
    Path(raw_height): Path<String>,
) -> Result<Response, AppError> {
    let height = height_param(&raw_height)?;

    let outcome = state
        .store
        .replace(height)
        .await
        .map_err(|e| internal_error(e, "Couldn't delete and create block entry"))?;
    tracing::info!(height, ?outcome, "instantiated block height entry");

    let (status, message) = match outcome {
        ReplaceOutcome::Created => (StatusCode::CREATED, "New block entry instantiated"),
        ReplaceOutcome::Replaced => (StatusCode::OK, "Block entry replaced"),
    };
    Ok((status, Json(InstantiateResponse { message, height })).into_response())
}

/// Update the stored height in place. Answers `null` when nothing is stored.
pub(super) async fn update_height(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Option<BlockHeightRecord>>, AppError> {
    let body = json_object(&body)?;
    let height = height_field(&body)?;

    let updated = state
        .store
        .update(height)
        .await
        .map_err(|e| internal_error(e, "Something went wrong when updating data"))?;
    if updated.is_none() {
        tracing::debug!(height, "update-height on empty store");
    }
    Ok(Json(updated))
}
