use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::qrcodes::{
    dtos as qrcodes_dtos, handlers as qrcodes_handlers, models as qrcodes_models,
};
use crate::features::validation::handlers as validation_handlers;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        // QR codes
        qrcodes_handlers::create_qrcode,
        qrcodes_handlers::list_qrcodes,
        qrcodes_handlers::get_qr_image,
        // Validation (public)
        validation_handlers::validate_document,
        // Contact (public)
        contact_handlers::send_contact_message,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // QR codes
            qrcodes_models::DocumentType,
            qrcodes_dtos::CreateQrCodeDto,
            qrcodes_dtos::QrRecordResponseDto,
            qrcodes_dtos::IssuedQrCodeDto,
            ApiResponse<qrcodes_dtos::IssuedQrCodeDto>,
            ApiResponse<Vec<qrcodes_dtos::QrRecordResponseDto>>,
            // Contact
            contact_dtos::ContactMessageDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin session endpoints"),
        (name = "qrcodes", description = "QR code issuance and listing for business documents"),
        (name = "validation", description = "Public document validation pages"),
        (name = "contact", description = "Contact form relay (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "PyDen API",
        version = "0.1.0",
        description = "API documentation for the PyDen site backend",
    )
)]
pub struct ApiDoc;

/// Adds the Bearer session-token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque session token")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
