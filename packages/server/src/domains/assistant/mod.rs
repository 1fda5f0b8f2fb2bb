//! Rule-based assistant over the demo ERP dataset.
//!
//! A free-text query is classified into one of a fixed set of intents via
//! ordered keyword checks, then answered by filtering and aggregating a
//! read-only dataset snapshot. Deterministic by design.

pub mod answer;
pub mod dataset;
pub mod intent;
pub mod models;

pub use answer::*;
pub use dataset::*;
pub use intent::*;
pub use models::*;
