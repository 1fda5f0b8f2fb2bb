// HTTP middleware
pub mod jwt_auth;
pub mod session;

pub use jwt_auth::*;
pub use session::*;
