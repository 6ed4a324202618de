//! Business logic services for the application layer.

pub mod auth_service;
pub mod image_service;
pub mod item_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use image_service::ImageService;
pub use item_service::{ItemService, RegisterOutcome};
pub use token_service::{PanelOutcome, TokenService};
