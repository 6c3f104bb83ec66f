//! Middleware for the billing API

mod tracing;

pub use self::tracing::request_tracing;
