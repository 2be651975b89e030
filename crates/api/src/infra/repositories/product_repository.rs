//! Product repository: read-only catalog queries.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Statement,
};

use super::entities::product::{self, Entity as ProductEntity};
use super::entities::shopping_list_product;
use common::{AppError, AppResult};
use domain::Product;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ranked full-text search. `$1` is the user's query and `$2` the row limit.
/// The extra `rank` column is ignored when rows are decoded into product models.
///
/// The text-search configuration is spliced in as a literal rather than bound:
/// the GIN index is on `to_tsvector('<config>'::regconfig, searchstr)` and the
/// planner only uses it when the query expression is identical.
fn search_sql(language: &str) -> AppResult<String> {
    if !domain::is_text_search_config(language) {
        return Err(AppError::internal(format!(
            "Invalid text search configuration: {:?}",
            language
        )));
    }

    Ok(format!(
        r#"
SELECT id, name, store, price, url, searchstr,
       ts_rank(to_tsvector('{lang}'::regconfig, searchstr), plainto_tsquery('{lang}'::regconfig, $1)) AS rank
FROM products
WHERE to_tsvector('{lang}'::regconfig, searchstr) @@ plainto_tsquery('{lang}'::regconfig, $1)
ORDER BY rank DESC
LIMIT $2
"#,
        lang = language
    ))
}

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn find_all(&self) -> AppResult<Vec<Product>>;

    /// Exact store-name match
    async fn find_by_store(&self, store: &str) -> AppResult<Vec<Product>>;

    /// Full-text search, best match first. Tie order is unspecified.
    async fn search(&self, text: &str, language: &str, limit: u64) -> AppResult<Vec<Product>>;

    /// Products referenced by a shopping list
    async fn find_by_shopping_list(&self, shopping_list_id: i32) -> AppResult<Vec<Product>>;
}

/// SeaORM-backed product repository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_store(&self, store: &str) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::Store.eq(store))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn search(&self, text: &str, language: &str, limit: u64) -> AppResult<Vec<Product>> {
        let limit = i64::try_from(limit)
            .map_err(|_| AppError::validation("Search limit too large"))?;
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            search_sql(language)?,
            [text.into(), limit.into()],
        );

        let models = ProductEntity::find()
            .from_raw_sql(statement)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_shopping_list(&self, shopping_list_id: i32) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .join(
                JoinType::InnerJoin,
                product::Relation::ShoppingListProduct.def(),
            )
            .filter(shopping_list_product::Column::ShoppingListId.eq(shopping_list_id))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}
