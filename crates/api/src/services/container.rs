//! Service Container - Centralized service access.
//!
//! Wires the concrete services to one shared `Persistence` and exposes them
//! behind their traits.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, Catalog, CatalogService, JwtTokenService, ShoppingListManager,
    ShoppingListService,
};
use crate::clients::{ScraperClient, ScraperGateway};
use crate::config::Config;
use crate::infra::Persistence;
use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn shopping_lists(&self) -> Arc<dyn ShoppingListService>;

    fn scraper(&self) -> Arc<dyn ScraperGateway>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    catalog_service: Arc<dyn CatalogService>,
    shopping_list_service: Arc<dyn ShoppingListService>,
    scraper: Arc<dyn ScraperGateway>,
}

impl Services {
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

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let tokens = Arc::new(JwtTokenService::from_config(&config.jwt)?);

        Ok(Self::new(
            Arc::new(Authenticator::new(uow.clone(), tokens)),
            Arc::new(Catalog::new(uow.clone(), config.search.clone())),
            Arc::new(ShoppingListManager::new(uow)),
            Arc::new(ScraperClient::new(&config.scraper)?),
        ))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn shopping_lists(&self) -> Arc<dyn ShoppingListService> {
        self.shopping_list_service.clone()
    }

    fn scraper(&self) -> Arc<dyn ScraperGateway> {
        self.scraper.clone()
    }
}
