//! HTTP handlers for the admin panel pages.

pub mod items;
pub mod login;
pub mod tokens;

pub use items::items;
pub use login::{login_page, login_submit};
pub use tokens::{tokens_mutate, tokens_page};
