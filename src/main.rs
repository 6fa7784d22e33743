mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::core::middleware::RateLimiter;
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::contact::{routes as contact_routes, ContactService};
use crate::features::qrcodes::{routes as qrcodes_routes, QrCodeService};
use crate::features::validation::routes as validation_routes;
use crate::modules::storage::QrImageStore;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Rate limit windows, mirroring the site's historical limits
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);
const LOGIN_RATE_LIMIT: u32 = 50;
const API_RATE_LIMIT: u32 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize auth service and seed the initial operator account
    let auth_service = Arc::new(AuthService::new(pool.clone(), &config.auth));
    if let Some((email, password)) = config.auth.admin_seed() {
        auth_service
            .ensure_admin_user(email, password)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed admin user: {}", e))?;
    } else {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; no operator account seeded");
    }
    tracing::info!("Auth service initialized");

    // Initialize QR image store
    let image_store = Arc::new(
        QrImageStore::new(&config.storage)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize QR image store: {}", e))?,
    );
    tracing::info!(
        "QR image store initialized at {}",
        config.storage.qr_image_dir.display()
    );

    // Initialize QR Code Service
    let qrcode_service = Arc::new(QrCodeService::new(
        pool.clone(),
        Arc::clone(&image_store),
        config.app.public_base_url.clone(),
    ));
    tracing::info!("QR code service initialized");

    // Initialize Contact Service (SMTP transport is built once here)
    let contact_service = Arc::new(
        ContactService::new(&config.mail)
            .map_err(|e| anyhow::anyhow!("Failed to initialize mail transport: {}", e))?,
    );
    tracing::info!("Contact service initialized (SMTP relay: {})", config.mail.host);

    // Rate limiters: tighter on login, looser on the admin API
    let login_limiter = RateLimiter::new(LOGIN_RATE_LIMIT, RATE_LIMIT_WINDOW);
    let api_limiter = RateLimiter::new(API_RATE_LIMIT, RATE_LIMIT_WINDOW);

    // Build swagger router with dynamic info
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    // Protected routes (require a valid admin session)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(qrcodes_routes::protected_routes(Arc::clone(
            &qrcode_service,
        )))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&api_limiter),
            middleware::rate_limit_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let login_routes = auth_routes::public_routes(Arc::clone(&auth_service)).route_layer(
        axum::middleware::from_fn_with_state(
            Arc::clone(&login_limiter),
            middleware::rate_limit_middleware,
        ),
    );

    let public_routes = Router::new()
        .merge(login_routes)
        .merge(validation_routes::routes(Arc::clone(&qrcode_service)))
        .merge(qrcodes_routes::public_routes(Arc::clone(&image_store)))
        .merge(contact_routes::routes(contact_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
