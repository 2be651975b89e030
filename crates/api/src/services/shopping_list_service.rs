//! Shopping list use cases.
//!
//! Creation runs in one transaction: owner and product existence checks,
//! the list row and its product links either all land or none do. Totals
//! are never stored; every read recomputes them from current prices.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use crate::infra::UnitOfWork;
use common::{AppResult, OptionExt};
use domain::{NewShoppingList, ShoppingListSummary, ShoppingListView, UserResponse};

#[async_trait]
pub trait ShoppingListService: Send + Sync {
    /// Persist a list with its product references and return the new id.
    async fn create(&self, list: NewShoppingList) -> AppResult<i32>;

    /// A list with owner, products and live total price.
    async fn get(&self, id: i32) -> AppResult<ShoppingListView>;

    /// Every list with its owner, without products.
    async fn list(&self) -> AppResult<Vec<ShoppingListSummary>>;
}

pub struct ShoppingListManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ShoppingListManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ShoppingListService for ShoppingListManager<U> {
    async fn create(&self, list: NewShoppingList) -> AppResult<i32> {
        let list_id = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.users()
                        .find_by_id(list.owner_id)
                        .await?
                        .ok_or_not_found("User")?;

                    let found = ctx.products().find_by_ids(&list.product_ids()).await?;
                    list.ensure_products_exist(&found)?;

                    let created = ctx.shopping_lists().insert(&list).await?;
                    Ok(created.id)
                })
            })
            .await?;

        tracing::info!(shopping_list_id = list_id, "Shopping list created");
        Ok(list_id)
    }

    async fn get(&self, id: i32) -> AppResult<ShoppingListView> {
        let list = self
            .uow
            .shopping_lists()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Shopping list")?;

        let users = self.uow.users();
        let products = self.uow.products();
        let (owner, products) = tokio::try_join!(
            users.find_by_id(list.owner_id),
            products.find_by_shopping_list(list.id),
        )?;
        let owner = owner.ok_or_not_found("User")?;

        Ok(ShoppingListView::assemble(
            list,
            UserResponse::from(owner),
            products,
        ))
    }

    async fn list(&self) -> AppResult<Vec<ShoppingListSummary>> {
        let lists = self.uow.shopping_lists().list().await?;
        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: BTreeSet<Uuid> = lists.iter().map(|l| l.owner_id).collect();
        let owners: HashMap<Uuid, UserResponse> = self
            .uow
            .users()
            .find_by_ids(owner_ids.into_iter().collect())
            .await?
            .into_iter()
            .map(|user| (user.id, UserResponse::from(user)))
            .collect();

        lists
            .into_iter()
            .map(|list| -> AppResult<ShoppingListSummary> {
                let owner = owners.get(&list.owner_id).cloned().ok_or_not_found("User")?;
                Ok(ShoppingListSummary {
                    id: list.id,
                    owner,
                    name: list.name,
                    created_at: list.created_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use super::*;
    use crate::infra::repositories::{
        MockProductRepository, MockShoppingListRepository, MockUserRepository,
    };
    use crate::services::testing::TestUnitOfWork;
    use common::AppError;
    use domain::{Product, ShoppingList, User};

    fn user(id: Uuid) -> User {
        User {
            id,
            email: "jan@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Jan".to_string(),
            last_name: "Jansen".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn list(id: i32, owner_id: Uuid) -> ShoppingList {
        ShoppingList {
            id,
            owner_id,
            name: format!("Boodschappen {}", id),
            created_at: Utc::now(),
        }
    }

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            store: "ah".to_string(),
            price: Decimal::new(cents, 2),
            url: None,
            search_text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_get_recomputes_total_from_current_prices() {
        let owner_id = Uuid::new_v4();

        let mut lists = MockShoppingListRepository::new();
        lists
            .expect_find_by_id()
            .with(eq(3))
            .returning(move |id| Ok(Some(list(id, owner_id))));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(owner_id))
            .returning(|id| Ok(Some(user(id))));
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_shopping_list()
            .with(eq(3))
            .returning(|_| Ok(vec![product(1, 150), product(2, 225)]));

        let uow = TestUnitOfWork::new()
            .with_users(users)
            .with_products(products)
            .with_shopping_lists(lists);
        let view = ShoppingListManager::new(Arc::new(uow)).get(3).await.unwrap();

        assert_eq!(view.total_price, Decimal::new(375, 2));
        assert_eq!(view.owner.id, owner_id);
        assert_eq!(view.products.len(), 2);
    }

    #[tokio::test]
    async fn test_get_empty_list_totals_zero() {
        let owner_id = Uuid::new_v4();

        let mut lists = MockShoppingListRepository::new();
        lists
            .expect_find_by_id()
            .returning(move |id| Ok(Some(list(id, owner_id))));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| Ok(Some(user(id))));
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_shopping_list()
            .returning(|_| Ok(Vec::new()));

        let uow = TestUnitOfWork::new()
            .with_users(users)
            .with_products(products)
            .with_shopping_lists(lists);
        let view = ShoppingListManager::new(Arc::new(uow)).get(1).await.unwrap();

        assert_eq!(view.total_price, Decimal::ZERO);
        assert!(view.products.is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_list_not_found() {
        let mut lists = MockShoppingListRepository::new();
        lists.expect_find_by_id().returning(|_| Ok(None));

        let uow = TestUnitOfWork::new().with_shopping_lists(lists);
        let result = ShoppingListManager::new(Arc::new(uow)).get(99999).await;

        assert!(matches!(result, Err(AppError::NotFound(entity)) if entity == "Shopping list"));
    }

    #[tokio::test]
    async fn test_list_attaches_owners() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut lists = MockShoppingListRepository::new();
        lists
            .expect_list()
            .returning(move || Ok(vec![list(1, alice), list(2, bob), list(3, alice)]));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_ids()
            .withf(|ids| ids.len() == 2)
            .returning(|ids| Ok(ids.into_iter().map(user).collect()));

        let uow = TestUnitOfWork::new()
            .with_users(users)
            .with_shopping_lists(lists);
        let summaries = ShoppingListManager::new(Arc::new(uow)).list().await.unwrap();

        let owners: Vec<Uuid> = summaries.iter().map(|s| s.owner.id).collect();
        assert_eq!(owners, vec![alice, bob, alice]);
    }

    #[tokio::test]
    async fn test_list_empty_skips_owner_lookup() {
        let mut lists = MockShoppingListRepository::new();
        lists.expect_list().returning(|| Ok(Vec::new()));
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().never();

        let uow = TestUnitOfWork::new()
            .with_users(users)
            .with_shopping_lists(lists);

        assert!(ShoppingListManager::new(Arc::new(uow))
            .list()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_propagates_transaction_failure() {
        let new_list = NewShoppingList::new(Uuid::new_v4(), "Weekend", [1, 2]).unwrap();

        let result = ShoppingListManager::new(Arc::new(TestUnitOfWork::new()))
            .create(new_list)
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
