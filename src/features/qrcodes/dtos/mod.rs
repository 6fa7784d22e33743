pub mod qrcode_dto;

pub use qrcode_dto::{CreateQrCodeDto, IssuedQrCodeDto, ListQrCodesQuery, QrRecordResponseDto};
