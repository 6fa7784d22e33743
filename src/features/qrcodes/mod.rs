//! QR code issuance and listing for business documents.
//!
//! An authenticated operator issues a QR code for a document
//! (type + free-text description + business id); the code encodes a public
//! validation URL. Records are immutable and unique per
//! `(type, external id)` pair.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/qrcodes` | Yes | Issue a QR code for a document |
//! | GET | `/api/qrcodes` | Yes | List issued records (filter + search) |
//! | GET | `/img/qrcodes/{file}` | No | Fetch a generated QR image |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::QrCodeService;
