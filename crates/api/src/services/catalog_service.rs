//! Product catalogue reads and full-text search.

use async_trait::async_trait;
use std::sync::Arc;

use crate::infra::UnitOfWork;
use common::{AppResult, OptionExt, SearchConfig};
use domain::{Product, ScrapeError};

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn product(&self, id: i32) -> AppResult<Product>;

    async fn all_products(&self) -> AppResult<Vec<Product>>;

    /// Exact, case-sensitive store match.
    async fn products_by_store(&self, store: &str) -> AppResult<Vec<Product>>;

    /// Ranked full-text search; blank input yields no results.
    async fn search(&self, text: &str) -> AppResult<Vec<Product>>;

    async fn scrape_errors(&self) -> AppResult<Vec<ScrapeError>>;
}

pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
    search: SearchConfig,
}

impl<U: UnitOfWork> Catalog<U> {
    pub fn new(uow: Arc<U>, search: SearchConfig) -> Self {
        Self { uow, search }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn product(&self, id: i32) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn all_products(&self) -> AppResult<Vec<Product>> {
        self.uow.products().find_all().await
    }

    async fn products_by_store(&self, store: &str) -> AppResult<Vec<Product>> {
        self.uow.products().find_by_store(store).await
    }

    async fn search(&self, text: &str) -> AppResult<Vec<Product>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut products = self
            .uow
            .products()
            .search(text, &self.search.language, self.search.result_limit)
            .await?;
        products.truncate(self.search.result_limit as usize);

        tracing::debug!(query = text, hits = products.len(), "Product search");
        Ok(products)
    }

    async fn scrape_errors(&self) -> AppResult<Vec<ScrapeError>> {
        self.uow.scrape_errors().list().await
    }
}
