pub mod qrcode_handler;

pub use qrcode_handler::*;
