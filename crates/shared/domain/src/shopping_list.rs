//! Shopping lists and the price aggregation rule.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAX_NAME_LENGTH;
use crate::error::{DomainError, DomainResult};
use crate::product::Product;
use crate::user::UserResponse;

/// Stored shopping list row. Products live in the association table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: i32,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a list.
#[derive(Debug, Clone)]
pub struct NewShoppingList {
    pub owner_id: Uuid,
    pub name: String,
    product_ids: BTreeSet<i32>,
}

impl NewShoppingList {
    /// Build a new list. Repeated product ids collapse into one reference.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        product_ids: impl IntoIterator<Item = i32>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Shopping list name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Shopping list name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        Ok(Self {
            owner_id,
            name,
            product_ids: product_ids.into_iter().collect(),
        })
    }

    /// Referenced product ids, ascending and unique.
    pub fn product_ids(&self) -> Vec<i32> {
        self.product_ids.iter().copied().collect()
    }

    /// Fail with `NotFound` unless every referenced product was found.
    pub fn ensure_products_exist(&self, found: &[Product]) -> DomainResult<()> {
        let found: BTreeSet<i32> = found.iter().map(|p| p.id).collect();
        let missing: Vec<String> = self
            .product_ids
            .difference(&found)
            .map(|id| id.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "Product {}",
                missing.join(", ")
            )))
        }
    }
}

/// Sum of the current prices of `products`. Zero for an empty list.
pub fn total_price(products: &[Product]) -> Decimal {
    products.iter().map(|p| p.price).sum()
}

/// A list with its owner, products and live total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShoppingListView {
    pub id: i32,
    pub owner: UserResponse,
    pub name: String,
    pub products: Vec<Product>,
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 3.75))]
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl ShoppingListView {
    pub fn assemble(list: ShoppingList, owner: UserResponse, products: Vec<Product>) -> Self {
        let total_price = total_price(&products);
        Self {
            id: list.id,
            owner,
            name: list.name,
            products,
            total_price,
        }
    }
}

/// List without its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShoppingListSummary {
    pub id: i32,
    pub owner: UserResponse,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id,
            name: format!("product {}", id),
            store: "jumbo".to_string(),
            price: Decimal::new(cents, 2),
            url: None,
            search_text: format!("product {}", id),
        }
    }

    #[test]
    fn test_total_price_of_empty_list_is_zero() {
        assert_eq!(total_price(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_price_sums_exactly() {
        let products = vec![product(1, 150), product(2, 225)];
        assert_eq!(total_price(&products), Decimal::new(375, 2));
    }

    #[test]
    fn test_total_price_has_no_float_drift() {
        let products: Vec<Product> = (0..10).map(|i| product(i, 10)).collect();
        assert_eq!(total_price(&products), Decimal::ONE);
    }

    #[test]
    fn test_duplicate_product_ids_collapse() {
        let list = NewShoppingList::new(Uuid::new_v4(), "week1", vec![3, 1, 3, 2, 1]).unwrap();
        assert_eq!(list.product_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = NewShoppingList::new(Uuid::new_v4(), "  ", vec![1]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_missing_products_reported() {
        let list = NewShoppingList::new(Uuid::new_v4(), "week1", vec![1, 2, 5]).unwrap();
        let err = list.ensure_products_exist(&[product(1, 100)]).unwrap_err();

        assert_eq!(err, DomainError::not_found("Product 2, 5"));
    }

    #[test]
    fn test_all_products_present() {
        let list = NewShoppingList::new(Uuid::new_v4(), "week1", vec![1, 2]).unwrap();
        assert!(list
            .ensure_products_exist(&[product(2, 100), product(1, 100)])
            .is_ok());
    }

    #[test]
    fn test_empty_list_needs_no_products() {
        let list = NewShoppingList::new(Uuid::new_v4(), "leeg", Vec::new()).unwrap();
        assert!(list.product_ids().is_empty());
        assert!(list.ensure_products_exist(&[]).is_ok());
    }

    #[test]
    fn test_view_computes_live_total() {
        let owner = UserResponse {
            id: Uuid::new_v4(),
            email: "anna@example.nl".to_string(),
            first_name: "Anna".to_string(),
            last_name: "de Vries".to_string(),
            created_at: Utc::now(),
        };
        let list = ShoppingList {
            id: 9,
            owner_id: owner.id,
            name: "week1".to_string(),
            created_at: Utc::now(),
        };

        let view = ShoppingListView::assemble(list, owner, vec![product(1, 150), product(2, 225)]);
        assert_eq!(view.total_price, Decimal::new(375, 2));
        assert_eq!(view.products.len(), 2);
    }
}
