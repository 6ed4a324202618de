//! Shared fixtures for handler tests: an [`AppState`] wired to mock
//! repositories and a throwaway on-disk store.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::api::middleware::flood::FloodLimiter;
use crate::application::services::{AuthService, ImageService, ItemService, TokenService};
use crate::domain::repositories::{
    ImageRepository, ItemRepository, MockImageRepository, MockItemRepository,
    MockSessionRepository, MockTokenRepository, SessionRepository, TokenRepository,
};
use crate::infrastructure::media::FileStore;
use crate::state::AppState;

static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

pub(crate) const TEST_LOGIN: &str = "admin";
pub(crate) const TEST_PASSWORD: &str = "password";

/// Mock repositories to be wired into a test [`AppState`]. Configure
/// expectations on the fields, then call [`app_state`].
pub(crate) struct TestRepos {
    pub tokens: MockTokenRepository,
    pub items: MockItemRepository,
    pub images: MockImageRepository,
    pub sessions: MockSessionRepository,
}

impl Default for TestRepos {
    fn default() -> Self {
        Self {
            tokens: MockTokenRepository::new(),
            items: MockItemRepository::new(),
            images: MockImageRepository::new(),
            sessions: MockSessionRepository::new(),
        }
    }
}

/// Owns a store's temp directory and removes it on drop, so every test
/// cleans up after itself without a manual `remove_dir_all`.
pub(crate) struct StoreDir {
    pub root: PathBuf,
}

impl Drop for StoreDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// A file store under a unique temp directory. Keep the guard alive for
/// as long as the store is used.
pub(crate) fn temp_store() -> (Arc<FileStore>, StoreDir) {
    let root = std::env::temp_dir().join(format!(
        "shopvault-test-{}-{}",
        std::process::id(),
        DIR_SEQ.fetch_add(1, Ordering::SeqCst)
    ));
    let store = FileStore::new(root.join("images"), root.join("previews"), 64);
    store.ensure_dirs().unwrap();
    (Arc::new(store), StoreDir { root })
}

/// Builds an [`AppState`] over the given mocks with a generous flood
/// limit, so rate limiting never interferes with unrelated tests.
pub(crate) fn app_state(repos: TestRepos) -> (AppState, StoreDir) {
    let (store, dir) = temp_store();
    (app_state_with(repos, store, 1000), dir)
}

pub(crate) fn app_state_with(
    repos: TestRepos,
    store: Arc<FileStore>,
    flood_burst: u32,
) -> AppState {
    let tokens: Arc<dyn TokenRepository> = Arc::new(repos.tokens);
    let items: Arc<dyn ItemRepository> = Arc::new(repos.items);
    let images: Arc<dyn ImageRepository> = Arc::new(repos.images);
    let sessions: Arc<dyn SessionRepository> = Arc::new(repos.sessions);

    AppState {
        auth_service: Arc::new(AuthService::new(
            sessions,
            TEST_LOGIN.to_string(),
            TEST_PASSWORD.to_string(),
        )),
        token_service: Arc::new(TokenService::new(tokens.clone())),
        item_service: Arc::new(ItemService::new(
            items.clone(),
            images.clone(),
            tokens.clone(),
            100,
        )),
        image_service: Arc::new(ImageService::new(images, tokens, store)),
        flood: Arc::new(FloodLimiter::new(1, flood_burst)),
        route_prefix: String::new(),
        max_upload_bytes: 8 * 1024 * 1024,
    }
}

/// A token row that expires an hour from now.
pub(crate) fn live_token(token: &str, shop_id: &str) -> crate::domain::entities::ShopToken {
    use chrono::Utc;

    crate::domain::entities::ShopToken {
        token: token.to_string(),
        shop_id: shop_id.to_string(),
        description: String::new(),
        expires_at: Utc::now().timestamp() + 3600,
        created_at: Utc::now(),
    }
}
