//! `GET /image/{id}` and `GET /preview/{id}`: image delivery.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Serves the full-size image. `404` when the id is unknown or the
/// owning token has expired; expired shops disappear entirely.
pub async fn image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response, AppError> {
    match state.image_service.open_image(&image_id).await? {
        Some(bytes) => Ok(jpeg_response(bytes)),
        None => Err(AppError::not_found(
            "No such image",
            json!({ "image_id": image_id }),
        )),
    }
}

/// Serves the downscaled preview, with the same visibility rules as
/// [`image`].
pub async fn preview(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response, AppError> {
    match state.image_service.open_preview(&image_id).await? {
        Some(bytes) => Ok(jpeg_response(bytes)),
        None => Err(AppError::not_found(
            "No such image",
            json!({ "image_id": image_id }),
        )),
    }
}

fn jpeg_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()
}
