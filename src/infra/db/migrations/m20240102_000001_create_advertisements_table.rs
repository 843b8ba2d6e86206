//! Migration: Create advertisements table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(advertisements_table()).await?;

        // Listing filters and sorts on these
        manager
            .create_index(
                Index::create()
                    .name("idx_advertisements_price_kopecks")
                    .table(Advertisements::Table)
                    .col(Advertisements::PriceKopecks)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advertisements_created_at")
                    .table(Advertisements::Table)
                    .col(Advertisements::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advertisements::Table).to_owned())
            .await
    }
}

fn advertisements_table() -> TableCreateStatement {
    Table::create()
        .table(Advertisements::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Advertisements::Id)
                .uuid()
                .not_null()
                .primary_key(),
        )
        // Length rules apply to the trimmed title, the stored value is untrimmed
        .col(ColumnDef::new(Advertisements::Title).text().not_null())
        .col(ColumnDef::new(Advertisements::Description).text().not_null())
        .col(ColumnDef::new(Advertisements::ImageUrl).text().not_null())
        .col(
            ColumnDef::new(Advertisements::PriceKopecks)
                .big_integer()
                .not_null()
                .check(Expr::col(Advertisements::PriceKopecks).gt(0)),
        )
        .col(ColumnDef::new(Advertisements::AuthorId).uuid().not_null())
        .col(
            ColumnDef::new(Advertisements::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_advertisements_author_id")
                .from(Advertisements::Table, Advertisements::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
enum Advertisements {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    PriceKopecks,
    AuthorId,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_column_is_unbounded_text() {
        let sql = advertisements_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""title" text NOT NULL"#), "{sql}");
        assert!(!sql.contains("varchar(100)"), "{sql}");
    }
}
