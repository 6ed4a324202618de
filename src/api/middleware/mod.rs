//! HTTP middleware for request processing and protection.

pub mod flood;
pub mod tracing;
