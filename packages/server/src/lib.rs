// ERP AI Try - API Core
//
// Backend for the "try the AI" demo: a deterministic, rule-based responder
// over a fixed ERP dataset, gated by a per-session guest quota. No model
// calls anywhere; every answer is a keyword match plus a dataset filter.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
