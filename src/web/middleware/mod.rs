//! Middleware for the admin panel.

pub mod web_auth;
