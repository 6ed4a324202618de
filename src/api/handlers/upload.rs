//! `POST /upload`: image upload for shop clients.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use serde_json::json;

use crate::api::dto::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Accepts a multipart upload with a `token` part and one image part.
///
/// The image part may be named `file`, `data`, or `image`; the first
/// one found wins. Answers `invalid_token` for a missing or expired
/// token, `invalid_request` when no image part is present or the bytes
/// do not decode, and `flood_limit` when the global upload limiter is
/// exhausted. On success the result is the freshly assigned image id.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let mut token = String::new();
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("token") => token = field.text().await.map_err(multipart_error)?,
            Some("file" | "data" | "image") if data.is_none() => {
                data = Some(field.bytes().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    if token.is_empty() || !state.token_service.is_live(&token).await? {
        return Ok(Json(ApiResponse::failure("invalid_token")));
    }

    let Some(data) = data else {
        return Ok(Json(ApiResponse::failure("invalid_request")));
    };

    if !state.flood.allow() {
        return Ok(Json(ApiResponse::failure("flood_limit")));
    }

    match state.image_service.store_upload(&token, data.to_vec()).await {
        Ok(image_id) => {
            metrics::counter!("shopvault_images_uploaded_total").increment(1);
            Ok(Json(ApiResponse::success(image_id)))
        }
        Err(AppError::Validation { .. }) => Ok(Json(ApiResponse::failure("invalid_request"))),
        Err(e) => Err(e),
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::bad_request("Malformed multipart body", json!({ "reason": e.to_string() }))
}
