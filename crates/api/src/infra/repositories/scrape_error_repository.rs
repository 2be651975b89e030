//! Scrape error log (read-only).

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::entities::scrape_error::{self, Entity as ScrapeErrorEntity};
use common::{AppError, AppResult};
use domain::ScrapeError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScrapeErrorRepository: Send + Sync {
    /// All logged errors, oldest first
    async fn list(&self) -> AppResult<Vec<ScrapeError>>;
}

pub struct ScrapeErrorStore {
    db: DatabaseConnection,
}

impl ScrapeErrorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScrapeErrorRepository for ScrapeErrorStore {
    async fn list(&self) -> AppResult<Vec<ScrapeError>> {
        let models = ScrapeErrorEntity::find()
            .order_by_asc(scrape_error::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ScrapeError::from).collect())
    }
}
