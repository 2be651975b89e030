//! HTTP request handlers.

pub mod auth_handler;
pub mod product_handler;
pub mod scraper_handler;
pub mod shopping_list_handler;

pub use auth_handler::auth_routes;
pub use product_handler::product_routes;
pub use scraper_handler::scraper_routes;
pub use shopping_list_handler::shopping_list_routes;
