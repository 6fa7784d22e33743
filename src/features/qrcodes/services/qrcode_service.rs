use std::sync::Arc;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::qrcodes::dtos::{CreateQrCodeDto, IssuedQrCodeDto, ListQrCodesQuery};
use crate::features::qrcodes::models::{DocumentType, QrRecord};
use crate::features::qrcodes::services::qr_render;
use crate::modules::storage::QrImageStore;
use crate::shared::constants::{MAX_QRCODE_LIST_LIMIT, QR_IMAGE_WIDTH};
use crate::shared::normalize::normalize_token;

const QR_RECORD_COLUMNS: &str =
    "id, doc_type, description, external_id, public_id, created_at";

/// Convert a database error on insert to a more specific AppError.
///
/// The `(doc_type, external_id)` unique index is what makes concurrent
/// identical creates safe; it surfaces here as a conflict. A collision on
/// `public_id` is not a caller mistake.
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if db_err.message().contains("qrcodes.public_id") {
                return AppError::Internal(
                    "Generated public identifier collided".to_string(),
                );
            }
            return AppError::Conflict(
                "A QR code already exists for this type and id".to_string(),
            );
        }
    }
    AppError::Database(e)
}

/// Service for QR code issuance and record access
pub struct QrCodeService {
    pool: SqlitePool,
    image_store: Arc<QrImageStore>,
    public_base_url: String,
}

impl QrCodeService {
    pub fn new(pool: SqlitePool, image_store: Arc<QrImageStore>, public_base_url: String) -> Self {
        Self {
            pool,
            image_store,
            public_base_url,
        }
    }

    /// Issue a QR code for a document.
    ///
    /// Validates and canonicalizes the input, persists the record, then
    /// renders and stores a PNG encoding the validation URL. The insert
    /// commits before the image is rendered; if rendering fails the record
    /// stays without an image and the request reports an internal error.
    pub async fn issue(&self, dto: CreateQrCodeDto) -> Result<IssuedQrCodeDto> {
        let raw_type = dto.doc_type.trim();
        let description = dto.description.trim();
        let external_id = dto.id.trim();

        if raw_type.is_empty() || description.is_empty() || external_id.is_empty() {
            return Err(AppError::Validation(
                "type, description and id are required".to_string(),
            ));
        }

        let doc_type = DocumentType::from_normalized(&normalize_token(raw_type)).ok_or_else(
            || {
                AppError::Validation(
                    "Invalid type: use contratos, orcamentos or propostas".to_string(),
                )
            },
        )?;

        // Random, independent of every record field
        let public_id = Uuid::new_v4().to_string();

        let record = sqlx::query_as::<_, QrRecord>(&format!(
            "INSERT INTO qrcodes (doc_type, description, external_id, public_id, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            QR_RECORD_COLUMNS
        ))
        .bind(doc_type)
        .bind(description)
        .bind(external_id)
        .bind(&public_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        let validation_url = format!("{}/validate/{}", self.public_base_url, public_id);

        let png = qr_render::render_png(&validation_url, QR_IMAGE_WIDTH)?;
        self.image_store.save(&public_id, &png).await?;

        tracing::info!(
            "QR code issued: id={}, type={}, external_id={}",
            record.id,
            record.doc_type,
            record.external_id
        );

        Ok(IssuedQrCodeDto {
            record: record.into(),
            validation_url,
            qr_image_url: self.image_store.public_url(&public_id),
        })
    }

    /// List issued records, newest first, capped at 200.
    ///
    /// The type filter is canonicalized like issuance input; a token
    /// outside the fixed set simply matches nothing. Search is a
    /// database-native substring match over description, external id and
    /// public id.
    pub async fn list(&self, query: ListQrCodesQuery) -> Result<Vec<QrRecord>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM qrcodes WHERE 1 = 1",
            QR_RECORD_COLUMNS
        ));

        if let Some(raw_type) = query.doc_type.as_deref().filter(|s| !s.trim().is_empty()) {
            builder.push(" AND doc_type = ");
            builder.push_bind(normalize_token(raw_type));
        }

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            builder.push(" AND (description LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR external_id LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR public_id LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY id DESC LIMIT ");
        builder.push_bind(MAX_QRCODE_LIST_LIMIT);

        let records = builder
            .build_query_as::<QrRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list QR records: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(records)
    }

    /// Look up a record by its public identifier
    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<QrRecord>> {
        let record = sqlx::query_as::<_, QrRecord>(&format!(
            "SELECT {} FROM qrcodes WHERE public_id = ?",
            QR_RECORD_COLUMNS
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up QR record: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(record)
    }

    pub fn image_store(&self) -> &QrImageStore {
        &self.image_store
    }
}
