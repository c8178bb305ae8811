use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Category: children lookups walk parent_category_id
        manager
            .create_index(
                Index::create()
                    .name("idx_category_parent")
                    .table(Category::Table)
                    .col(Category::ParentCategoryId)
                    .to_owned(),
            )
            .await?;

        // Book: listing by category subtree
        manager
            .create_index(
                Index::create()
                    .name("idx_book_category")
                    .table(Book::Table)
                    .col(Book::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_category_parent").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_book_category").table(Book::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Category { Table, ParentCategoryId }

#[derive(DeriveIden)]
enum Book { Table, CategoryId }
