//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-step writes inside a single
//! database transaction: commit on `Ok`, rollback on `Err`.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{product, shopping_list, shopping_list_product, user};
use super::repositories::{
    ProductRepository, ProductStore, ScrapeErrorRepository, ScrapeErrorStore,
    ShoppingListRepository, ShoppingListStore, UserRepository, UserStore,
};
use common::{AppError, AppResult};
use domain::{NewShoppingList, Product, ShoppingList, User};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method;
/// tests provide their own implementation or drive `Persistence` with a
/// mock connection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    fn shopping_lists(&self) -> Arc<dyn ShoppingListRepository>;

    fn scrape_errors(&self) -> Arc<dyn ScrapeErrorRepository>;

    /// Execute a closure within a ReadCommitted transaction.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn products(&self) -> TxProductRepository<'_> {
        TxProductRepository { txn: self.txn }
    }

    pub fn shopping_lists(&self) -> TxShoppingListRepository<'_> {
        TxShoppingListRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    product_repo: Arc<ProductStore>,
    shopping_list_repo: Arc<ShoppingListStore>,
    scrape_error_repo: Arc<ScrapeErrorStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            shopping_list_repo: Arc::new(ShoppingListStore::new(db.clone())),
            scrape_error_repo: Arc::new(ScrapeErrorStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn shopping_lists(&self) -> Arc<dyn ShoppingListRepository> {
        self.shopping_list_repo.clone()
    }

    fn scrape_errors(&self) -> Arc<dyn ScrapeErrorRepository> {
        self.scrape_error_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-scoped user lookups.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }
}

/// Transaction-scoped product lookups.
pub struct TxProductRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxProductRepository<'a> {
    /// Products whose id is in `ids`; unknown ids are skipped
    pub async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = product::Entity::find()
            .filter(product::Column::Id.is_in(ids.iter().copied()))
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}

/// Transaction-scoped shopping list writes.
pub struct TxShoppingListRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxShoppingListRepository<'a> {
    /// Insert the list row and one association row per product.
    pub async fn insert(&self, list: &NewShoppingList) -> AppResult<ShoppingList> {
        let model = shopping_list::ActiveModel {
            owner_id: Set(list.owner_id),
            name: Set(list.name.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.txn)
        .await
        .map_err(map_reference_error)?;

        let links: Vec<shopping_list_product::ActiveModel> = list
            .product_ids()
            .into_iter()
            .map(|product_id| shopping_list_product::ActiveModel {
                shopping_list_id: Set(model.id),
                product_id: Set(product_id),
            })
            .collect();

        if !links.is_empty() {
            shopping_list_product::Entity::insert_many(links)
                .exec_without_returning(self.txn)
                .await
                .map_err(map_reference_error)?;
        }

        Ok(ShoppingList::from(model))
    }
}

/// A row deleted between validation and insert still reads as not found.
fn map_reference_error(err: DbErr) -> AppError {
    classify_write_error(err.sql_err(), err)
}

fn classify_write_error(kind: Option<SqlErr>, err: DbErr) -> AppError {
    match kind {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::not_found("Referenced row"),
        _ => AppError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_violation_is_not_found() {
        let err = classify_write_error(
            Some(SqlErr::ForeignKeyConstraintViolation(
                "violates foreign key constraint \"fk_products_shoppinglists_product\"".into(),
            )),
            DbErr::Custom("insert failed".into()),
        );

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Referenced row"));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let unique = classify_write_error(
            Some(SqlErr::UniqueConstraintViolation("duplicate key".into())),
            DbErr::Custom("insert failed".into()),
        );
        let unclassified = classify_write_error(None, DbErr::Custom("connection reset".into()));

        assert!(matches!(unique, AppError::Database(_)));
        assert!(matches!(unclassified, AppError::Database(_)));
    }
}
