//! Create `sub_category` table with FK to `category`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(SubCategory::Id))
                    .col(integer(SubCategory::CategoryId).not_null())
                    .col(string_len(SubCategory::Name, 128).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_category_category")
                            .from(SubCategory::Table, SubCategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SubCategory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SubCategory { Table, Id, CategoryId, Name }

#[derive(DeriveIden)]
enum Category { Table, Id }
