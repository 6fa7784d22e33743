pub mod qr_render;
pub mod qrcode_service;

pub use qrcode_service::QrCodeService;
