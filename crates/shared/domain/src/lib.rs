//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod password;
pub mod product;
pub mod scraper;
pub mod shopping_list;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use product::{is_text_search_config, Product, ScrapeError};
pub use scraper::{ScraperHealth, ScraperState, ScraperStatus};
pub use shopping_list::{
    total_price, NewShoppingList, ShoppingList, ShoppingListSummary, ShoppingListView,
};
pub use user::{NewUser, User, UserResponse};
