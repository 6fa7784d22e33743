use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/admin/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require a valid session)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/admin/logout", post(handlers::logout))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::shared::test_helpers::{test_pool, with_admin_session};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    async fn test_auth_service() -> Arc<AuthService> {
        Arc::new(AuthService::new(
            test_pool().await,
            &AuthConfig {
                session_ttl_hours: 8,
                admin_email: None,
                admin_password: None,
            },
        ))
    }

    #[tokio::test]
    async fn test_logout_requires_session_user() {
        let service = test_auth_service().await;
        let server = TestServer::new(protected_routes(service)).unwrap();

        let response = server.post("/admin/logout").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_with_injected_session() {
        let service = test_auth_service().await;
        let server =
            TestServer::new(with_admin_session(protected_routes(service))).unwrap();

        let response = server.post("/admin/logout").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
}
