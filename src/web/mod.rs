//! Admin panel: login, token management pages, and their middleware.

pub mod handlers;
pub mod middleware;
pub mod routes;
