use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::qrcodes::models::{DocumentType, QrRecord};

/// Request DTO for issuing a QR code
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQrCodeDto {
    /// Document category, free text; canonicalized before validation
    #[serde(rename = "type")]
    #[validate(length(max = 100, message = "Type must not exceed 100 characters"))]
    pub doc_type: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: String,

    /// Business identifier of the document, unique per type
    #[validate(length(max = 255, message = "Id must not exceed 255 characters"))]
    pub id: String,
}

/// Query params for listing issued records
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQrCodesQuery {
    /// Filter by document type (free text, canonicalized)
    #[serde(rename = "type")]
    pub doc_type: Option<String>,

    /// Substring match over description, external id and public id
    pub search: Option<String>,
}

/// Response DTO for an issued record
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrRecordResponseDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub description: String,
    pub external_id: String,
    pub public_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<QrRecord> for QrRecordResponseDto {
    fn from(record: QrRecord) -> Self {
        Self {
            id: record.id,
            doc_type: record.doc_type,
            description: record.description,
            external_id: record.external_id,
            public_id: record.public_id,
            created_at: record.created_at,
        }
    }
}

/// Response DTO for a freshly issued QR code
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedQrCodeDto {
    pub record: QrRecordResponseDto,
    /// The URL the QR image encodes
    pub validation_url: String,
    /// Where the rendered PNG can be fetched
    pub qr_image_url: String,
}
