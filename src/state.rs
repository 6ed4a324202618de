//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::api::middleware::flood::FloodLimiter;
use crate::application::services::{AuthService, ImageService, ItemService, TokenService};

/// Handler-visible services plus the global flood limiter.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub item_service: Arc<ItemService>,
    pub image_service: Arc<ImageService>,
    pub flood: Arc<FloodLimiter>,
    /// Mount prefix of the whole router, empty when served at the root.
    pub route_prefix: String,
    /// Request body cap for `/upload`, applied as a per-route layer.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Absolute path of a panel page, honoring the mount prefix.
    pub fn panel_url(&self, rest: &str) -> String {
        if rest.is_empty() {
            format!("{}/panel", self.route_prefix)
        } else {
            format!("{}/panel/{rest}", self.route_prefix)
        }
    }
}
