// Business domains

pub mod assistant;
pub mod auth;
pub mod quota;
