//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live
//! in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`TokenRepository`] - shop token CRUD and uniqueness checks
//! - [`ItemRepository`] - sub-item records and listings
//! - [`ImageRepository`] - image-id ownership
//! - [`SessionRepository`] - admin panel sessions

pub mod image_repository;
pub mod item_repository;
pub mod session_repository;
pub mod token_repository;

pub use image_repository::ImageRepository;
pub use item_repository::ItemRepository;
pub use session_repository::SessionRepository;
pub use token_repository::TokenRepository;

#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
