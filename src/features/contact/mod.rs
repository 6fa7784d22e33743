//! Contact form relay.
//!
//! Visitor messages from the marketing site are relayed to a configured
//! inbox over SMTP. No persistence, no retries; a transport failure is the
//! caller's 500.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/contact` | No | Relay a visitor message by email |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ContactService;
