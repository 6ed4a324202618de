//! `POST /update`: sub-item registration for shop clients.

use axum::Json;
use axum::extract::{Form, State};

use crate::api::dto::{ApiResponse, UpdateRequest};
use crate::application::services::RegisterOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a sub-item under a token.
///
/// Answers `invalid_token` for a missing or expired token,
/// `invalid_request` for an empty item id, a bad image list, or a
/// duplicate (token, id, color, size, type) key, and `flood_limit`
/// when the limiter is exhausted. A successful registration has an
/// empty-string result.
pub async fn update(
    State(state): State<AppState>,
    Form(request): Form<UpdateRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if request.token.is_empty() || !state.token_service.is_live(&request.token).await? {
        return Ok(Json(ApiResponse::failure("invalid_token")));
    }

    if request.id.is_empty() {
        return Ok(Json(ApiResponse::failure("invalid_request")));
    }

    if !state.flood.allow() {
        return Ok(Json(ApiResponse::failure("flood_limit")));
    }

    match state
        .item_service
        .register(&request.into_new_sub_item())
        .await?
    {
        RegisterOutcome::Registered => {
            metrics::counter!("shopvault_items_registered_total").increment(1);
            Ok(Json(ApiResponse::success(String::new())))
        }
        RegisterOutcome::Invalid => Ok(Json(ApiResponse::failure("invalid_request"))),
    }
}
