//! Create `book` table.
//!
//! `category_id` is checked by the service layer on write only; there is no
//! foreign key, so removing a category leaves its books pointing at nothing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string_len(Book::Name, 256).unique_key().not_null())
                    .col(string_len(Book::Author, 256).not_null())
                    .col(integer(Book::CategoryId).not_null())
                    .col(text_null(Book::Description))
                    .col(timestamp_with_time_zone(Book::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Book::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Name, Author, CategoryId, Description, CreatedAt, UpdatedAt }
