pub mod qr_image_store;

pub use qr_image_store::QrImageStore;
