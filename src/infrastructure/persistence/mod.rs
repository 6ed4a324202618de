//! PostgreSQL repository implementations.

pub mod pg_image_repository;
pub mod pg_item_repository;
pub mod pg_session_repository;
pub mod pg_token_repository;

pub use pg_image_repository::PgImageRepository;
pub use pg_item_repository::PgItemRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_token_repository::PgTokenRepository;
