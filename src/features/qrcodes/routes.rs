use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::qrcodes::handlers;
use crate::features::qrcodes::services::QrCodeService;
use crate::modules::storage::QrImageStore;

/// Issuance and listing routes (require a valid session)
pub fn protected_routes(service: Arc<QrCodeService>) -> Router {
    Router::new()
        .route(
            "/api/qrcodes",
            post(handlers::create_qrcode).get(handlers::list_qrcodes),
        )
        .with_state(service)
}

/// Image retrieval route (public)
pub fn public_routes(store: Arc<QrImageStore>) -> Router {
    Router::new()
        .route("/img/qrcodes/{file}", get(handlers::get_qr_image))
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AuthConfig, StorageConfig};
    use crate::core::middleware;
    use crate::features::auth::{routes as auth_routes, AuthService};
    use crate::shared::test_helpers::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    /// Full wiring for the admin surface: login + gated issuance routes,
    /// exactly as assembled in main.
    async fn test_server() -> TestServer {
        let pool = test_pool().await;

        let auth_service = Arc::new(AuthService::new(
            pool.clone(),
            &AuthConfig {
                session_ttl_hours: 8,
                admin_email: None,
                admin_password: None,
            },
        ));
        auth_service
            .ensure_admin_user("admin@test.local", "secret")
            .await
            .unwrap();

        let storage = StorageConfig {
            qr_image_dir: std::env::temp_dir().join(format!("qr-routes-test-{}", Uuid::new_v4())),
        };
        let image_store = Arc::new(QrImageStore::new(&storage).await.unwrap());
        let qrcode_service = Arc::new(QrCodeService::new(
            pool,
            Arc::clone(&image_store),
            "http://localhost:4000".to_string(),
        ));

        let protected = Router::new()
            .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
            .merge(protected_routes(Arc::clone(&qrcode_service)))
            .route_layer(axum::middleware::from_fn_with_state(
                Arc::clone(&auth_service),
                middleware::auth_middleware,
            ));

        let app = Router::new()
            .merge(auth_routes::public_routes(auth_service))
            .merge(public_routes(image_store))
            .merge(protected);

        TestServer::new(app).unwrap()
    }

    async fn login(server: &TestServer) -> String {
        let response = server
            .post("/admin/login")
            .json(&json!({"email": "admin@test.local", "password": "secret"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_issuance_requires_session() {
        let server = test_server().await;

        let response = server
            .post("/api/qrcodes")
            .json(&json!({"type": "contratos", "description": "x", "id": "1"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server.get("/api/qrcodes").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_issue_list_and_fetch_image() {
        let server = test_server().await;
        let token = login(&server).await;

        let response = server
            .post("/api/qrcodes")
            .authorization_bearer(&token)
            .json(&json!({
                "type": "Contratos",
                "description": "Contrato de prestação",
                "id": "C-001"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["data"]["record"]["type"], "contratos");
        let image_url = body["data"]["qrImageUrl"].as_str().unwrap().to_string();

        // Duplicate pair conflicts
        let response = server
            .post("/api/qrcodes")
            .authorization_bearer(&token)
            .json(&json!({
                "type": "CONTRATOS ",
                "description": "outro",
                "id": "C-001"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);

        let response = server
            .get("/api/qrcodes")
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);

        // The image is public
        let response = server.get(&image_url).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");
    }

    #[tokio::test]
    async fn test_invalid_type_is_rejected() {
        let server = test_server().await;
        let token = login(&server).await;

        let response = server
            .post("/api/qrcodes")
            .authorization_bearer(&token)
            .json(&json!({"type": "invalido", "description": "x", "id": "1"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_image_is_not_found() {
        let server = test_server().await;

        let response = server
            .get(&format!("/img/qrcodes/{}.png", Uuid::new_v4()))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        // Non-UUID file names never reach the filesystem
        let response = server.get("/img/qrcodes/..%2Fsecrets.png").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
