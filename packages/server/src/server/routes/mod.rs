// HTTP routes
pub mod ai_try;
pub mod health;

pub use ai_try::*;
pub use health::*;
