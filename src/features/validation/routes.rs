use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::qrcodes::services::QrCodeService;
use crate::features::validation::handlers;

/// Create routes for the public validator
///
/// Note: this feature is public by design (no authentication)
pub fn routes(service: Arc<QrCodeService>) -> Router {
    Router::new()
        .route("/validate/{public_id}", get(handlers::validate_document))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::features::qrcodes::dtos::CreateQrCodeDto;
    use crate::modules::storage::QrImageStore;
    use crate::shared::test_helpers::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use uuid::Uuid;

    async fn test_setup() -> (TestServer, Arc<QrCodeService>) {
        let storage = StorageConfig {
            qr_image_dir: std::env::temp_dir()
                .join(format!("validation-test-{}", Uuid::new_v4())),
        };
        let image_store = Arc::new(QrImageStore::new(&storage).await.unwrap());
        let service = Arc::new(QrCodeService::new(
            test_pool().await,
            image_store,
            "http://localhost:4000".to_string(),
        ));

        let server = TestServer::new(routes(Arc::clone(&service))).unwrap();
        (server, service)
    }

    #[tokio::test]
    async fn test_validate_shows_issued_record() {
        let (server, service) = test_setup().await;

        let issued = service
            .issue(CreateQrCodeDto {
                doc_type: "Contratos".to_string(),
                description: "Contrato de prestação".to_string(),
                id: "C-001".to_string(),
            })
            .await
            .unwrap();

        let response = server
            .get(&format!("/validate/{}", issued.record.public_id))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let html = response.text();
        assert!(html.contains("contratos"));
        assert!(html.contains("C-001"));
        assert!(html.contains("Contrato de prestação"));
        assert!(html.contains(&format!("/img/qrcodes/{}.png", issued.record.public_id)));
    }

    #[tokio::test]
    async fn test_validate_unknown_id_renders_not_found() {
        let (server, _) = test_setup().await;

        let response = server
            .get(&format!("/validate/{}", Uuid::new_v4()))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let html = response.text();
        assert!(html.contains("Documento não encontrado"));
    }
}
