//! Guest quota: unauthenticated sessions get a fixed number of prompts.

pub mod store;
pub mod tracker;

pub use store::*;
pub use tracker::*;
