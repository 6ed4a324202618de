//! Admin panel route configuration.

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::web::handlers::{items, login_page, login_submit, tokens_mutate, tokens_page};
use crate::web::middleware::web_auth;

/// Panel routes, nested under `/panel`.
///
/// `GET|POST /panel` (login) and the static assets are public; the
/// tokens page and its item listing sit behind the session cookie.
pub fn panel_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/tokens", get(tokens_page).post(tokens_mutate))
        .route("/tokens/items", post(items))
        .route_layer(middleware::from_fn_with_state(state, web_auth::layer));

    Router::new()
        .route("/", get(login_page).post(login_submit))
        .merge(protected)
        .nest_service("/static", ServeDir::new("static"))
}
