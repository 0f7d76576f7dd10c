//! HTTP routes and non-webhook handlers.

pub mod health;
pub mod routes;
