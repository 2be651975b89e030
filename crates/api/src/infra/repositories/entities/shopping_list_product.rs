//! Association between shopping lists and products.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products_shoppinglists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub shopping_list_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shopping_list::Entity",
        from = "Column::ShoppingListId",
        to = "super::shopping_list::Column::Id",
        on_delete = "Cascade"
    )]
    ShoppingList,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::shopping_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingList.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
