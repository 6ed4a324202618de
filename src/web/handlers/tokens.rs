//! Tokens page: listing plus create/edit/delete form handling.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use chrono::DateTime;
use serde::Deserialize;

use crate::application::services::PanelOutcome;
use crate::domain::entities::TokenOverview;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the tokens page.
#[derive(Template, WebTemplate)]
#[template(path = "tokens.html")]
struct TokensTemplate {
    suggested_token: String,
    suggested_shop_id: String,
    rows: Vec<TokenRow>,
}

/// One rendered token row. `num` is the row index embedded in element
/// ids (`shop_id{num}`, `datetimepicker{num}`, …) so the page script
/// can address per-row inputs.
struct TokenRow {
    num: usize,
    token: String,
    shop_id: String,
    description: String,
    expired: bool,
    /// Human-readable expiry, shown in the row header.
    expires_display: String,
    /// `datetime-local` value prefilling the row's picker.
    expires_input: String,
    items_count: i64,
    images_count: i64,
}

impl TokenRow {
    fn build(num: usize, overview: TokenOverview, now: i64) -> Self {
        let token = overview.token;
        let expires = DateTime::from_timestamp(token.expires_at, 0).unwrap_or(DateTime::UNIX_EPOCH);

        Self {
            num,
            expired: token.is_expired(now),
            expires_display: expires.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            expires_input: expires.format("%Y-%m-%dT%H:%M").to_string(),
            token: token.token,
            shop_id: token.shop_id,
            description: token.description,
            items_count: overview.items_count,
            images_count: overview.images_count,
        }
    }
}

/// `GET /panel/tokens`
///
/// Renders all tokens with usage counts, plus an unused token value and
/// shop id prefilling the create form.
pub async fn tokens_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let now = chrono::Utc::now().timestamp();
    let rows = state
        .token_service
        .list_overview()
        .await?
        .into_iter()
        .enumerate()
        .map(|(num, overview)| TokenRow::build(num, overview, now))
        .collect();

    let template = TokensTemplate {
        suggested_token: state.token_service.suggest_token().await?,
        suggested_shop_id: state.token_service.suggest_shop_id().await?,
        rows,
    };

    Ok(template.into_response())
}

#[derive(Debug, Deserialize)]
pub struct TokenMutationForm {
    /// Operation selector: `create`, `edit`, or `delete`.
    #[serde(default)]
    pub v: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub shop_id: String,
    #[serde(default)]
    pub description: String,
    /// Expiry as epoch seconds, produced by the page script from the
    /// `datetime-local` picker.
    #[serde(default)]
    pub exp_time: String,
}

/// `POST /panel/tokens`
///
/// Applies one token mutation and answers with a literal text body the
/// page script branches on: `ok` on success, `invalid_request` on any
/// business rejection (including an unknown `v`). Deleting also removes
/// the token's image files; deleting an unknown token is still `ok`.
pub async fn tokens_mutate(
    State(state): State<AppState>,
    Form(form): Form<TokenMutationForm>,
) -> Result<&'static str, AppError> {
    let outcome = match form.v.as_str() {
        "create" => {
            state
                .token_service
                .create(&form.token, &form.shop_id, &form.description, &form.exp_time)
                .await?
        }
        "edit" => {
            state
                .token_service
                .edit(&form.token, &form.shop_id, &form.description, &form.exp_time)
                .await?
        }
        "delete" => {
            let image_ids = state.token_service.delete(&form.token).await?;
            state.image_service.remove_files(image_ids).await;
            PanelOutcome::Applied
        }
        _ => PanelOutcome::Invalid,
    };

    Ok(match outcome {
        PanelOutcome::Applied => "ok",
        PanelOutcome::Invalid => "invalid_request",
    })
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;
    use chrono::Utc;

    use crate::domain::entities::{ShopToken, TokenOverview};
    use crate::test_util::{TestRepos, app_state};

    fn server(state: crate::state::AppState) -> TestServer {
        let app = Router::new()
            .route(
                "/panel/tokens",
                get(super::tokens_page).post(super::tokens_mutate),
            )
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    fn overview(token: &str, shop_id: &str, expires_at: i64) -> TokenOverview {
        TokenOverview {
            token: ShopToken {
                token: token.to_string(),
                shop_id: shop_id.to_string(),
                description: format!("shop {shop_id}"),
                expires_at,
                created_at: Utc::now(),
            },
            items_count: 3,
            images_count: 7,
        }
    }

    #[tokio::test]
    async fn test_tokens_page_lists_rows() {
        let mut repos = TestRepos::default();
        let live_until = Utc::now().timestamp() + 3600;
        repos.tokens.expect_list_overview().returning(move || {
            Ok(vec![
                overview("liveTok", "42", live_until),
                overview("oldTok", "17", 60),
            ])
        });
        repos.tokens.expect_exists().returning(|_| Ok(false));
        repos.tokens.expect_shop_id_owner().returning(|_| Ok(None));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server.get("/panel/tokens").await;

        response.assert_status(StatusCode::OK);
        let body = response.text();
        assert!(body.contains("liveTok"));
        assert!(body.contains("oldTok"));
        assert!(body.contains("Valid through:"));
        assert!(body.contains("Expired:"));
        // Per-row element ids carry the row index.
        assert!(body.contains("id=\"shop_id0\""));
        assert!(body.contains("id=\"datetimepicker1\""));
    }

    #[tokio::test]
    async fn test_tokens_page_prefills_suggestions() {
        let mut repos = TestRepos::default();
        repos.tokens.expect_list_overview().returning(|| Ok(vec![]));
        repos.tokens.expect_exists().returning(|_| Ok(false));
        repos.tokens.expect_shop_id_owner().returning(|_| Ok(None));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let body = server.get("/panel/tokens").await.text();

        // The create form is prefilled with a fresh 12-char token.
        assert!(body.contains("id=\"description\""));
        assert!(body.contains("id=\"create_datetimepicker\""));
    }

    #[tokio::test]
    async fn test_create_ok() {
        let mut repos = TestRepos::default();
        repos.tokens.expect_exists().returning(|_| Ok(false));
        repos.tokens.expect_shop_id_owner().returning(|_| Ok(None));
        repos.tokens.expect_insert().times(1).returning(|_| Ok(()));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel/tokens")
            .form(&[
                ("v", "create"),
                ("token", "newTok"),
                ("shop_id", "42"),
                ("description", "spring shop"),
                ("exp_time", "1700000000"),
            ])
            .await;

        assert_eq!(response.text(), "ok");
    }

    #[tokio::test]
    async fn test_create_duplicate_token_invalid() {
        let mut repos = TestRepos::default();
        repos.tokens.expect_exists().returning(|_| Ok(true));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel/tokens")
            .form(&[
                ("v", "create"),
                ("token", "dup"),
                ("shop_id", "42"),
                ("exp_time", "1700000000"),
            ])
            .await;

        assert_eq!(response.text(), "invalid_request");
    }

    #[tokio::test]
    async fn test_edit_ok() {
        let mut repos = TestRepos::default();
        repos.tokens.expect_exists().returning(|_| Ok(true));
        repos
            .tokens
            .expect_shop_id_owner()
            .returning(|_| Ok(Some("tok".to_string())));
        repos.tokens.expect_update().times(1).returning(|_| Ok(()));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel/tokens")
            .form(&[
                ("v", "edit"),
                ("token", "tok"),
                ("shop_id", "42"),
                ("description", "renamed"),
                ("exp_time", "1700000000"),
            ])
            .await;

        assert_eq!(response.text(), "ok");
    }

    #[tokio::test]
    async fn test_delete_unknown_token_still_ok() {
        let mut repos = TestRepos::default();
        repos.tokens.expect_delete().returning(|_| Ok(None));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel/tokens")
            .form(&[("v", "delete"), ("token", "ghost")])
            .await;

        assert_eq!(response.text(), "ok");
    }

    #[tokio::test]
    async fn test_unknown_operation_invalid() {
        let (state, _dir) = app_state(TestRepos::default());
        let server = server(state);
        let response = server
            .post("/panel/tokens")
            .form(&[("v", "promote"), ("token", "tok")])
            .await;

        assert_eq!(response.text(), "invalid_request");
    }
}
