use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::models::{Session, SessionUser, User};

/// Hash a plain password with argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
    use argon2::Argon2;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against an argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use argon2::Argon2;

    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Service for admin authentication and session management
pub struct AuthService {
    pool: SqlitePool,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            pool,
            session_ttl_hours: config.session_ttl_hours,
        }
    }

    /// Authenticate an operator and open a session.
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = ?",
        )
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {:?}", e);
            AppError::Database(e)
        })?;

        let user = match user {
            Some(user) if verify_password(&dto.password, &user.password_hash) => user,
            _ => return Err(AppError::Auth("Invalid credentials".to_string())),
        };

        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.session_ttl_hours);

        sqlx::query(
            "INSERT INTO sessions (token, user_id, email, created_at, expires_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&token)
        .bind(user.id)
        .bind(&user.email)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Session opened for {}", user.email);

        Ok(LoginResponseDto { token, expires_at })
    }

    /// Resolve a session token to its operator.
    ///
    /// Expired rows are deleted when they are seen; the caller gets the
    /// same error whether the token is unknown or stale.
    pub async fn validate_session(&self, token: &str) -> Result<SessionUser> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, user_id, email, created_at, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up session: {:?}", e);
            AppError::Database(e)
        })?;

        let session = session
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        if session.expires_at <= Utc::now() {
            sqlx::query("DELETE FROM sessions WHERE token = ?")
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete expired session: {:?}", e);
                    AppError::Database(e)
                })?;
            return Err(AppError::Unauthorized(
                "Invalid or expired session".to_string(),
            ));
        }

        Ok(SessionUser {
            user_id: session.user_id,
            email: session.email,
            token: session.token,
        })
    }

    /// Close a session (idempotent)
    pub async fn logout(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete session: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    /// Seed the initial operator account if it does not exist yet
    pub async fn ensure_admin_user(&self, email: &str, password: &str) -> Result<()> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check for initial admin user: {:?}", e);
                AppError::Database(e)
            })?;

        if existing.is_some() {
            return Ok(());
        }

        let password_hash = hash_password(password)?;

        sqlx::query(
            "INSERT INTO users (email, password_hash, role, created_at) VALUES (?, ?, 'admin', ?)",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create initial admin user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Initial admin user created: {}", email);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;

    async fn test_service() -> AuthService {
        let config = AuthConfig {
            session_ttl_hours: 8,
            admin_email: None,
            admin_password: None,
        };
        AuthService::new(test_pool().await, &config)
    }

    fn login_dto(email: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = test_service().await;

        let err = service
            .login(login_dto("nobody@test.local", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = test_service().await;
        service
            .ensure_admin_user("admin@test.local", "correct")
            .await
            .unwrap();

        let err = service
            .login(login_dto("admin@test.local", "incorrect"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn test_login_opens_valid_session() {
        let service = test_service().await;
        service
            .ensure_admin_user("admin@test.local", "correct")
            .await
            .unwrap();

        let response = service
            .login(login_dto("admin@test.local", "correct"))
            .await
            .unwrap();
        assert!(response.expires_at > Utc::now());

        let user = service.validate_session(&response.token).await.unwrap();
        assert_eq!(user.email, "admin@test.local");
        assert_eq!(user.token, response.token);
    }

    #[tokio::test]
    async fn test_validate_unknown_token() {
        let service = test_service().await;

        let err = service.validate_session("no-such-token").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let service = test_service().await;
        service
            .ensure_admin_user("admin@test.local", "pw")
            .await
            .unwrap();

        // Insert a session that expired an hour ago
        let token = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO sessions (token, user_id, email, created_at, expires_at) \
             VALUES (?, 1, 'admin@test.local', ?, ?)",
        )
        .bind(&token)
        .bind(Utc::now() - Duration::hours(9))
        .bind(Utc::now() - Duration::hours(1))
        .execute(&service.pool)
        .await
        .unwrap();

        let err = service.validate_session(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE token = ?")
                .bind(&token)
                .fetch_one(&service.pool)
                .await
                .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_logout_closes_session() {
        let service = test_service().await;
        service
            .ensure_admin_user("admin@test.local", "pw")
            .await
            .unwrap();

        let response = service
            .login(login_dto("admin@test.local", "pw"))
            .await
            .unwrap();
        service.logout(&response.token).await.unwrap();

        let err = service
            .validate_session(&response.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_ensure_admin_user_is_idempotent() {
        let service = test_service().await;
        service
            .ensure_admin_user("admin@test.local", "pw")
            .await
            .unwrap();
        service
            .ensure_admin_user("admin@test.local", "other")
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        // The original password still works; the second call did not overwrite
        assert!(service.login(login_dto("admin@test.local", "pw")).await.is_ok());
    }
}
