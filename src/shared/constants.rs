/// Maximum number of records returned by the QR code listing
pub const MAX_QRCODE_LIST_LIMIT: i64 = 200;

/// Rendered QR image width and height in pixels
pub const QR_IMAGE_WIDTH: u32 = 600;

/// Public URL prefix under which stored QR images are served
pub const QR_IMAGE_URL_PREFIX: &str = "/img/qrcodes";
