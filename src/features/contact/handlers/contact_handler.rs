use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::contact::dtos::ContactMessageDto;
use crate::features::contact::services::ContactService;
use crate::shared::types::ApiResponse;

/// Relay a contact form submission by email
///
/// This is a public endpoint for the marketing site's contact form.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactMessageDto,
    responses(
        (status = 200, description = "Message relayed"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Mail transport failure")
    ),
    tag = "contact"
)]
pub async fn send_contact_message(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<ContactMessageDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.relay(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Mensagem enviada com sucesso!".to_string()),
        None,
    )))
}
