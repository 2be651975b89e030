//! Shopping list repository (reads). Creation runs inside a unit of work.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::entities::shopping_list::{self, Entity as ShoppingListEntity};
use common::{AppError, AppResult};
use domain::ShoppingList;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ShoppingList>>;

    async fn list(&self) -> AppResult<Vec<ShoppingList>>;
}

pub struct ShoppingListStore {
    db: DatabaseConnection,
}

impl ShoppingListStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShoppingListRepository for ShoppingListStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ShoppingList>> {
        let result = ShoppingListEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ShoppingList::from))
    }

    async fn list(&self) -> AppResult<Vec<ShoppingList>> {
        let models = ShoppingListEntity::find()
            .order_by_asc(shopping_list::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ShoppingList::from).collect())
    }
}
