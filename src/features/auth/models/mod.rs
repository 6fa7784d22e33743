pub mod session;
pub mod user;

pub use session::{Session, SessionUser};
pub use user::User;
