//! Product database entity. Rows are written by the scraper.

use sea_orm::entity::prelude::*;

use domain::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub store: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub url: Option<String>,
    pub searchstr: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shopping_list_product::Entity")]
    ShoppingListProduct,
}

impl Related<super::shopping_list_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            name: model.name,
            store: model.store,
            price: model.price,
            url: model.url,
            search_text: model.searchstr,
        }
    }
}
