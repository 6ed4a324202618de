//! Panel login page and credential submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::session_cookie;

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /panel`
///
/// Renders the login page, or redirects straight to the tokens page
/// when the `uuid` cookie already carries a live session.
pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(session_id) = session_cookie(&headers) {
        if state.auth_service.verify(&session_id).await? {
            return Ok(Redirect::to(&state.panel_url("tokens")).into_response());
        }
    }

    Ok(LoginTemplate {}.into_response())
}

/// `POST /panel`
///
/// Checks the submitted credentials. Success answers the literal body
/// `ok` and sets the `uuid` session cookie; the page script reads the
/// body and navigates to the tokens page. A mismatch answers the
/// literal `incorrect login or password`, which the script shows under
/// the form.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .auth_service
        .login(&form.login, &form.password)
        .await?
    {
        Some(session_id) => {
            let cookie = format!("uuid={session_id}; Path=/");
            Ok(([(header::SET_COOKIE, cookie)], "ok").into_response())
        }
        None => Ok("incorrect login or password".into_response()),
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use crate::test_util::{TEST_LOGIN, TEST_PASSWORD, TestRepos, app_state};

    fn server(state: crate::state::AppState) -> TestServer {
        let app = Router::new()
            .route("/panel", get(super::login_page).post(super::login_submit))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_login_page_renders_form() {
        let (state, _dir) = app_state(TestRepos::default());
        let server = server(state);
        let response = server.get("/panel").await;

        response.assert_status(StatusCode::OK);
        let body = response.text();
        assert!(body.contains("id=\"login\""));
        assert!(body.contains("id=\"password\""));
        assert!(body.contains("id=\"button-login\""));
    }

    #[tokio::test]
    async fn test_login_page_redirects_when_already_authenticated() {
        let mut repos = TestRepos::default();
        repos.sessions.expect_exists().returning(|_| Ok(true));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .get("/panel")
            .add_header("cookie", "uuid=some-session")
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/panel/tokens");
    }

    #[tokio::test]
    async fn test_login_submit_success_sets_cookie() {
        let mut repos = TestRepos::default();
        repos.sessions.expect_insert().times(1).returning(|_| Ok(()));

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel")
            .form(&[("login", TEST_LOGIN), ("password", TEST_PASSWORD)])
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.text(), "ok");
        let cookie = response.header("set-cookie");
        assert!(cookie.to_str().unwrap().starts_with("uuid="));
    }

    #[tokio::test]
    async fn test_login_submit_wrong_password() {
        let mut repos = TestRepos::default();
        repos.sessions.expect_insert().times(0);

        let (state, _dir) = app_state(repos);
        let server = server(state);
        let response = server
            .post("/panel")
            .form(&[("login", TEST_LOGIN), ("password", "nope")])
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.text(), "incorrect login or password");
        assert!(!response.headers().contains_key("set-cookie"));
    }
}
