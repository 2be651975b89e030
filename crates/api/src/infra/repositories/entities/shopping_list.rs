//! Shopping list database entity.

use sea_orm::entity::prelude::*;

use domain::ShoppingList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shopping_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::shopping_list_product::Entity")]
    ShoppingListProduct,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::shopping_list_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingListProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ShoppingList {
    fn from(model: Model) -> Self {
        ShoppingList {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
