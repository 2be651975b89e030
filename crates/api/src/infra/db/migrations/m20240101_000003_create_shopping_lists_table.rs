//! Migration: Create shopping lists and their product associations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShoppingLists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShoppingLists::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ShoppingLists::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(ShoppingLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_lists_owner")
                            .from(ShoppingLists::Table, ShoppingLists::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductsShoppinglists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductsShoppinglists::ShoppingListId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductsShoppinglists::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProductsShoppinglists::ShoppingListId)
                            .col(ProductsShoppinglists::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_shoppinglists_list")
                            .from(
                                ProductsShoppinglists::Table,
                                ProductsShoppinglists::ShoppingListId,
                            )
                            .to(ShoppingLists::Table, ShoppingLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_shoppinglists_product")
                            .from(
                                ProductsShoppinglists::Table,
                                ProductsShoppinglists::ProductId,
                            )
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductsShoppinglists::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShoppingLists::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ShoppingLists {
    Table,
    Id,
    OwnerId,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum ProductsShoppinglists {
    Table,
    ShoppingListId,
    ProductId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}
