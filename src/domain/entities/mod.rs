//! Core business entities.

pub mod item;
pub mod token;

pub use item::{ItemSummary, NewSubItem, SubItem};
pub use token::{NewShopToken, ShopToken, TokenOverview, truncate_to_minute};
