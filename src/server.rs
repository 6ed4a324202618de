//! HTTP server initialization and runtime setup.
//!
//! Connects to PostgreSQL, applies migrations, prepares the image
//! store, and runs the Axum server until interrupted.

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::api::middleware::flood::FloodLimiter;
use crate::application::services::{AuthService, ImageService, ItemService, TokenService};
use crate::config::Config;
use crate::infrastructure::media::FileStore;
use crate::infrastructure::persistence::{
    PgImageRepository, PgItemRepository, PgSessionRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migration run, storage
/// directory creation, or server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(FileStore::new(
        &config.images_dir,
        &config.previews_dir,
        config.preview_max_dim,
    ));
    store.ensure_dirs()?;

    let pool = Arc::new(pool);
    let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
    let items = Arc::new(PgItemRepository::new(pool.clone()));
    let images = Arc::new(PgImageRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            sessions,
            config.admin_login.clone(),
            config.admin_password.clone(),
        )),
        token_service: Arc::new(TokenService::new(tokens.clone())),
        item_service: Arc::new(ItemService::new(
            items.clone(),
            images.clone(),
            tokens.clone(),
            config.max_images_per_item,
        )),
        image_service: Arc::new(ImageService::new(images, tokens, store)),
        flood: Arc::new(FloodLimiter::new(
            config.upload_rate_per_sec,
            config.upload_burst,
        )),
        route_prefix: config.route_prefix.clone(),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutting down");
}
