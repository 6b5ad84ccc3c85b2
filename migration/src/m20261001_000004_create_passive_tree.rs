use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-row table, the seeder always writes id = 1
        manager
            .create_table(
                Table::create()
                    .table(PassiveTree::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PassiveTree::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PassiveTree::Version).string().not_null())
                    .col(ColumnDef::new(PassiveTree::Json).text().not_null())
                    .col(
                        ColumnDef::new(PassiveTree::FetchedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PassiveTree::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PassiveTree {
    Table,
    Id,
    Version,
    Json,
    FetchedAt,
}
