use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SubCategory: lookups by owning category
        manager
            .create_index(
                Index::create()
                    .name("idx_sub_category_category")
                    .table(SubCategory::Table)
                    .col(SubCategory::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Business: composite unique (email, name); registration inserts with ON CONFLICT on it
        manager
            .create_index(
                Index::create()
                    .name("uniq_business_email_name")
                    .table(Business::Table)
                    .col(Business::Email)
                    .col(Business::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Business: search joins through sub_category
        manager
            .create_index(
                Index::create()
                    .name("idx_business_sub_category")
                    .table(Business::Table)
                    .col(Business::SubCategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sub_category_category").table(SubCategory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_business_email_name").table(Business::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_business_sub_category").table(Business::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SubCategory { Table, CategoryId }

#[derive(DeriveIden)]
enum Business { Table, Email, Name, SubCategoryId }
