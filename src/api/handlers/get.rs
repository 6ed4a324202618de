//! `GET /get`: image-id lookup for shop storefront pages.

use axum::Json;
use axum::extract::{Query, State};

use crate::api::dto::{ApiResponse, GetQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the ordered image ids registered under a
/// (shop, item, color, size) key.
///
/// Answers `invalid_id` when the shop id is unknown, the shop's token
/// has expired, or nothing is registered under the key.
pub async fn get_images(
    State(state): State<AppState>,
    Query(query): Query<GetQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    if query.shop_id.is_empty() || query.id.is_empty() {
        return Ok(Json(ApiResponse::failure("invalid_request")));
    }

    match state
        .item_service
        .images_for(&query.shop_id, &query.id, &query.color, &query.size)
        .await?
    {
        Some(ids) => Ok(Json(ApiResponse::success(ids))),
        None => Ok(Json(ApiResponse::failure("invalid_id"))),
    }
}
