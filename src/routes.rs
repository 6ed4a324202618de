//! Top-level router combining the shop API and the admin panel.
//!
//! # Route Structure
//!
//! - `POST /upload`       - Image upload (shop token)
//! - `POST /update`       - Sub-item registration (shop token)
//! - `GET  /get`          - Image-id lookup (public)
//! - `GET  /image/{id}`   - Full-size image (public while token is live)
//! - `GET  /preview/{id}` - Downscaled preview
//! - `/panel/*`           - Admin panel (cookie session required)
//! - `/panel/static/*`    - Panel assets
//!
//! The whole tree can be nested under a configured prefix for
//! deployments sharing a host with other services.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{get as get_handler, image, update, upload};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(base_router(state))
}

fn base_router(state: AppState) -> Router {
    // Axum caps bodies at 2 MiB by default, well below the upload sizes
    // shop clients send. Raise the limit for `/upload` only.
    let shop_api = Router::new()
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/update", post(update::update))
        .route("/get", get(get_handler::get_images))
        .route("/image/{id}", get(image::image))
        .route("/preview/{id}", get(image::preview));

    let router = Router::new()
        .merge(shop_api)
        .nest("/panel", web::routes::panel_routes(state.clone()));

    let router = if state.route_prefix.is_empty() {
        router
    } else {
        let prefix = state.route_prefix.clone();
        Router::new().nest(&prefix, router)
    };

    router.with_state(state).layer(tracing::layer())
}
