pub mod auth;
pub mod contact;
pub mod qrcodes;
pub mod validation;
