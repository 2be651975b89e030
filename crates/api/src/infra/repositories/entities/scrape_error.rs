//! Scrape error log entity.

use sea_orm::entity::prelude::*;

use domain::ScrapeError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scrape_errors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scraper: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ScrapeError {
    fn from(model: Model) -> Self {
        ScrapeError {
            id: model.id,
            scraper: model.scraper,
            message: model.message,
        }
    }
}
