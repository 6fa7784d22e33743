#[cfg(test)]
use crate::features::auth::models::SessionUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_session_user() -> SessionUser {
    SessionUser {
        user_id: 1,
        email: "admin@test.local".to_string(),
        token: "test-session-token".to_string(),
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_admin_session_middleware(mut request: Request, next: Next) -> Response {
    request
        .extensions_mut()
        .insert(create_admin_session_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_session_middleware))
}

/// In-memory SQLite pool with the full schema applied.
///
/// A single connection is required: every connection to `sqlite::memory:`
/// opens its own private database.
#[cfg(test)]
#[allow(dead_code)]
pub async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    crate::core::database::MIGRATOR
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}
