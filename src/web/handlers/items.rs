//! Item listing endpoint behind the tokens page.

use axum::Json;
use axum::extract::{Form, State};
use serde::Deserialize;

use crate::domain::entities::ItemSummary;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemsForm {
    #[serde(default)]
    pub token: String,
}

/// `POST /panel/tokens/items`
///
/// Returns a token's registered items as JSON for the collapsible tree
/// on the tokens page. A token with no items yields `[]`.
pub async fn items(
    State(state): State<AppState>,
    Form(form): Form<ItemsForm>,
) -> Result<Json<Vec<ItemSummary>>, AppError> {
    Ok(Json(state.item_service.list_for_token(&form.token).await?))
}
