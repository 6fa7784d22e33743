pub mod qr_record;

pub use qr_record::{DocumentType, QrRecord};
