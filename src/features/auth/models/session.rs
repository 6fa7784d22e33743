use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Database model for a server-side session
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The authenticated operator attached to a request by the session gate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
    /// The opaque session token the request authenticated with
    #[serde(skip)]
    pub token: String,
}
