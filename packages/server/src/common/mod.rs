// Common types and utilities shared across the application

pub mod error;
pub mod format;

pub use error::*;
pub use format::*;
