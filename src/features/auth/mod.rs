//! Admin session gate.
//!
//! Operators authenticate with email and password; a successful login
//! creates a server-side session with an absolute expiry window. The
//! issuance and listing endpoints are gated on a valid session, the public
//! validator is not.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/login` | No | Authenticate and open a session |
//! | POST | `/admin/logout` | Yes | Close the current session |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AuthService;
