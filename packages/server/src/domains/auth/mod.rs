// Authentication domain: JWT creation and verification.
//
// Login flows live in the surrounding ERP application; this service only
// needs to tell authenticated bearers apart from guests.

pub mod jwt;

pub use jwt::*;
