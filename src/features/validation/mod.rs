//! Public document validation pages.
//!
//! The trust surface of the QR workflow: anyone scanning an issued code
//! lands here. No authentication; an unknown identifier gets a "not found"
//! page that reveals nothing about the records.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/validate/{public_id}` | No | Render the validation page |

pub mod handlers;
pub mod routes;
