//! Create `business` table with FKs to `category` and `sub_category`.
//!
//! `password_hash` holds an Argon2 PHC string; `document` holds the opaque
//! name the media store assigned to the uploaded file.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Business::Table)
                    .if_not_exists()
                    .col(pk_auto(Business::Id))
                    .col(string_len(Business::Name, 200).not_null())
                    .col(string_len(Business::Email, 255).not_null())
                    .col(string_len(Business::PasswordHash, 255).not_null())
                    .col(text(Business::Description).not_null())
                    .col(string_len(Business::Location, 500).not_null())
                    .col(double(Business::Latitude).not_null())
                    .col(double(Business::Longitude).not_null())
                    .col(string_len(Business::Document, 128).not_null())
                    .col(integer(Business::CategoryId).not_null())
                    .col(integer(Business::SubCategoryId).not_null())
                    .col(timestamp_with_time_zone(Business::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_category")
                            .from(Business::Table, Business::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_sub_category")
                            .from(Business::Table, Business::SubCategoryId)
                            .to(SubCategory::Table, SubCategory::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Business::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Business {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Description,
    Location,
    Latitude,
    Longitude,
    Document,
    CategoryId,
    SubCategoryId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum SubCategory { Table, Id }
