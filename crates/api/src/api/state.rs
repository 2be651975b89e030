//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::clients::ScraperGateway;
use crate::services::{AuthService, CatalogService, ServiceContainer, ShoppingListService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub shopping_list_service: Arc<dyn ShoppingListService>,
    pub scraper: Arc<dyn ScraperGateway>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        catalog_service: Arc<dyn CatalogService>,
        shopping_list_service: Arc<dyn ShoppingListService>,
        scraper: Arc<dyn ScraperGateway>,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            shopping_list_service,
            scraper,
        }
    }

    /// Take every service from a container.
    pub fn from_services(container: &dyn ServiceContainer) -> Self {
        Self::new(
            container.auth(),
            container.catalog(),
            container.shopping_lists(),
            container.scraper(),
        )
    }
}
