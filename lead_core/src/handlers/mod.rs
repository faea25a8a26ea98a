//! HTTP handlers

pub mod health;
pub mod routes;
pub mod sites;
pub mod webhook;

pub use routes::create_routes;
