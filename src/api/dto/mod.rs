//! Data Transfer Objects for the shop API.

pub mod envelope;
pub mod item;

pub use envelope::ApiResponse;
pub use item::{GetQuery, UpdateRequest};
