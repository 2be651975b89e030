//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub mod entities;
mod product_repository;
mod scrape_error_repository;
mod shopping_list_repository;
mod user_repository;

pub use product_repository::{ProductRepository, ProductStore};
pub use scrape_error_repository::{ScrapeErrorRepository, ScrapeErrorStore};
pub use shopping_list_repository::{ShoppingListRepository, ShoppingListStore};
pub use user_repository::{UserRecord, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use scrape_error_repository::MockScrapeErrorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use shopping_list_repository::MockShoppingListRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
