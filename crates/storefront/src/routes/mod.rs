//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Redirect to /store
//! GET  /health          - Health check
//!
//! # Store
//! GET  /store           - Store page
//! GET  /store/items     - Items + checkout button fragment (HTMX)
//!
//! # Checkout
//! POST /checkout        - Checkout action (redirects to the hosted page)
//! POST /api/checkout    - Create a checkout session ({amount, user} -> {id})
//!
//! # Auth
//! GET  /api/login       - Redirect to Discord OAuth
//! GET  /api/callback    - Handle OAuth callback
//! GET  /api/logout      - Clear the session user
//! ```

pub mod api;
pub mod checkout;
pub mod store;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, checkout_rate_limiter};
use crate::state::AppState;

/// Create the store page routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/store", get(store::show))
        .route("/store/items", get(store::items))
}

/// Create the checkout routes router (rate limited).
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::checkout))
        .route("/api/checkout", post(api::checkout::create))
        .layer(checkout_rate_limiter())
}

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", get(api::auth::login))
        .route("/api/callback", get(api::auth::callback))
        .route("/api/logout", get(api::auth::logout))
        .layer(auth_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/store") }))
        .merge(store_routes())
        .merge(checkout_routes())
        .merge(auth_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header::LOCATION};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::config::{DiscordConfig, PaymentsConfig, StoreConfig};
    use crate::middleware::create_session_layer;

    use super::*;

    fn test_app() -> Router {
        let config = StoreConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            payments: PaymentsConfig {
                publishable_key: "pk_test_4eC39HqLyjWDarjtT1zdp7dc".to_string(),
                secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
                api_url: "http://127.0.0.1:9".to_string(),
                checkout_url: "http://127.0.0.1:9/api/checkout".to_string(),
            },
            discord: DiscordConfig {
                client_id: "1012345678901234567".to_string(),
                client_secret: SecretString::from("uJb2rK8qX5mN3pW9zL4vT7yD1gH6sF0a"),
                authorize_url: "https://discord.com/oauth2/authorize".to_string(),
                api_url: "http://127.0.0.1:9".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };
        let state = crate::state::AppState::new(config).unwrap();

        routes()
            .layer(create_session_layer("http://localhost:3000"))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_root_redirects_to_store() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/store");
    }

    #[tokio::test]
    async fn test_store_page_renders_for_anonymous_visitor() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/store")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Login with Discord"));
        assert!(html.contains("500 Shards"));
        assert!(html.contains("15,000 Shards"));
    }

    #[tokio::test]
    async fn test_items_fragment_marks_selection() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/store/items?selected=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(html.matches("is-selected").count(), 1);
    }

    #[tokio::test]
    async fn test_checkout_requires_authentication() {
        // Anonymous POST /checkout never reaches the payment flow
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/checkout")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("item=0"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/store");
    }
}
