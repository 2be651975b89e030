//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod catalog_service;
pub mod container;
mod shopping_list_service;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use catalog_service::{Catalog, CatalogService};
pub use shopping_list_service::{ShoppingListManager, ShoppingListService};
pub use token_service::{Claims, IssuedToken, JwtTokenService, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use token_service::MockTokenService;
