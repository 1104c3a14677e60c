//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, get_accounts_page,
        get_edit_account_page, get_new_account_page, update_account_endpoint,
    },
    auth::{auth_guard, auth_guard_hx, get_log_in_page, get_log_out, post_log_in},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    register_user::{get_register_page, register_user},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user));

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_new_account_page))
        .route(endpoints::EDIT_ACCOUNT_VIEW, get(get_edit_account_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes need to use the HX-Redirect header for auth
    // redirects to work properly for htmx requests.
    let protected_api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(
            endpoints::ACCOUNT,
            put(update_account_endpoint).delete(delete_account_endpoint),
        )
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    protected_routes
        .merge(protected_api_routes)
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root route redirects to the dashboard; the auth guard bounces
/// unauthenticated visitors to the log-in page first.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::{TestResponse, TestServer};
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use serde_json::json;

    use crate::{AppState, build_router, endpoints};

    fn test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "secret", "UTC")
            .expect("could not create test state");

        TestServer::new(build_router(state))
    }

    /// Register a user and return the response carrying the auth cookie for
    /// follow-up requests.
    async fn register_test_user(server: &TestServer) -> TestResponse {
        let response = server
            .post(endpoints::USERS)
            .form(&json!({
                "email": "test@example.com",
                "password": "asomewhatlongpassword1",
                "confirm_password": "asomewhatlongpassword1",
            }))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);

        response
    }

    #[tokio::test]
    async fn unauthenticated_page_request_redirects_to_log_in() {
        let server = test_server();

        let response = server.get(endpoints::TRANSACTIONS_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn log_in_page_renders_form() {
        let server = test_server();

        let response = server.get(endpoints::LOG_IN_VIEW).await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let form_selector = Selector::parse("form").unwrap();
        assert!(document.select(&form_selector).next().is_some());
    }

    #[tokio::test]
    async fn register_then_view_dashboard() {
        let server = test_server();
        let register_response = register_test_user(&server).await;
        let cookie = register_response.cookie("token");

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let heading_selector = Selector::parse("h2").unwrap();
        let headings: Vec<String> = document
            .select(&heading_selector)
            .map(|heading| heading.text().collect())
            .collect();
        assert!(headings.iter().any(|text| text.contains("Recent Transactions")));
    }

    #[tokio::test]
    async fn created_transaction_appears_on_transactions_page() {
        let server = test_server();
        let register_response = register_test_user(&server).await;
        let cookie = register_response.cookie("token");

        let create_response = server
            .post(endpoints::TRANSACTIONS_API)
            .add_cookie(cookie.clone())
            .form(&json!({
                "title": "Weekly groceries",
                "amount": "54.20",
                "kind": "expense",
                "date_time": "2024-01-15T18:30",
                "category_id": "",
            }))
            .await;
        create_response.assert_status(StatusCode::SEE_OTHER);

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let page = response.text();
        assert!(page.contains("Weekly groceries"));
        assert!(page.contains("54.20"));
    }

    #[tokio::test]
    async fn search_query_filters_transactions_page() {
        let server = test_server();
        let register_response = register_test_user(&server).await;
        let cookie = register_response.cookie("token");

        for title in ["Weekly groceries", "Petrol"] {
            server
                .post(endpoints::TRANSACTIONS_API)
                .add_cookie(cookie.clone())
                .form(&json!({
                    "title": title,
                    "amount": "10",
                    "kind": "expense",
                    "date_time": "2024-01-15T18:30",
                    "category_id": "",
                }))
                .await
                .assert_status(StatusCode::SEE_OTHER);
        }

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("q", "groceries")
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let page = response.text();
        assert!(page.contains("Weekly groceries"));
        assert!(!page.contains("Petrol"));
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found() {
        let server = test_server();

        let response = server.get("/definitely/not/a/route").await;

        response.assert_status_not_found();
    }
}
