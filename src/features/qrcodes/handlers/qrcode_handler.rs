use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::qrcodes::dtos::{
    CreateQrCodeDto, IssuedQrCodeDto, ListQrCodesQuery, QrRecordResponseDto,
};
use crate::features::qrcodes::services::QrCodeService;
use crate::modules::storage::QrImageStore;
use crate::shared::types::{ApiResponse, Meta};

/// Issue a QR code for a business document
#[utoipa::path(
    post,
    path = "/api/qrcodes",
    request_body = CreateQrCodeDto,
    responses(
        (status = 201, description = "QR code issued", body = ApiResponse<IssuedQrCodeDto>),
        (status = 400, description = "Missing fields or invalid type"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A QR code already exists for this type and id"),
        (status = 500, description = "Storage or image generation failure")
    ),
    tag = "qrcodes",
    security(
        ("session_token" = [])
    )
)]
pub async fn create_qrcode(
    State(service): State<Arc<QrCodeService>>,
    AppJson(dto): AppJson<CreateQrCodeDto>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedQrCodeDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let issued = service.issue(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(issued), None, None)),
    ))
}

/// List issued QR code records, newest first, capped at 200
#[utoipa::path(
    get,
    path = "/api/qrcodes",
    params(ListQrCodesQuery),
    responses(
        (status = 200, description = "List of issued records", body = ApiResponse<Vec<QrRecordResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "qrcodes",
    security(
        ("session_token" = [])
    )
)]
pub async fn list_qrcodes(
    State(service): State<Arc<QrCodeService>>,
    Query(query): Query<ListQrCodesQuery>,
) -> Result<Json<ApiResponse<Vec<QrRecordResponseDto>>>> {
    let records = service.list(query).await?;
    let total = records.len() as i64;
    let data: Vec<QrRecordResponseDto> = records.into_iter().map(|r| r.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Fetch a generated QR image by its stable path
#[utoipa::path(
    get,
    path = "/img/qrcodes/{file}",
    params(
        ("file" = String, Path, description = "Image file name, `{publicId}.png`")
    ),
    responses(
        (status = 200, description = "PNG image"),
        (status = 404, description = "No image for this public id")
    ),
    tag = "qrcodes"
)]
pub async fn get_qr_image(
    State(store): State<Arc<QrImageStore>>,
    Path(file): Path<String>,
) -> Result<Response> {
    // Public ids are UUIDs; anything else is rejected before touching the
    // filesystem.
    let public_id = file
        .strip_suffix(".png")
        .filter(|id| Uuid::parse_str(id).is_ok())
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let bytes = store
        .load(public_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}
