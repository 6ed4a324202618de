//! Shop-facing HTTP API: upload, update, get, and image delivery.

pub mod dto;
pub mod handlers;
pub mod middleware;
