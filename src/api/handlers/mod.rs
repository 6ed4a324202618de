//! HTTP handlers for the shop-facing API.

pub mod get;
pub mod image;
pub mod update;
pub mod upload;
