//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod product;
pub mod scrape_error;
pub mod shopping_list;
pub mod shopping_list_product;
pub mod user;
