use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::features::qrcodes::services::QrCodeService;
use crate::shared::templates::render_template;

/// Render the public validation page for an issued QR code
#[utoipa::path(
    get,
    path = "/validate/{public_id}",
    params(
        ("public_id" = String, Path, description = "Public identifier from the QR code")
    ),
    responses(
        (status = 200, description = "Validation page"),
        (status = 404, description = "No document for this identifier")
    ),
    tag = "validation"
)]
pub async fn validate_document(
    State(service): State<Arc<QrCodeService>>,
    Path(public_id): Path<String>,
) -> Result<Response> {
    let record = service.find_by_public_id(&public_id).await?;

    match record {
        Some(record) => {
            let html = render_template(
                "validate.html",
                context! {
                    doc_type => record.doc_type.as_str(),
                    external_id => record.external_id,
                    description => record.description,
                    created_at => record.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                    qr_image_url => service.image_store().public_url(&record.public_id),
                },
            )
            .map_err(|e| AppError::Internal(e.to_string()))?;

            Ok(Html(html).into_response())
        }
        None => {
            let html = render_template("validate_not_found.html", context! {})
                .map_err(|e| AppError::Internal(e.to_string()))?;

            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
    }
}
