use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only price history, one row per listing per run
        manager
            .create_table(
                Table::create()
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prices::Item).string().not_null())
                    .col(ColumnDef::new(Prices::League).string().not_null())
                    .col(ColumnDef::new(Prices::Source).string_len(16).not_null())
                    .col(ColumnDef::new(Prices::ChaosValue).double().not_null())
                    .col(ColumnDef::new(Prices::DivineValue).double().not_null())
                    .col(ColumnDef::new(Prices::Payload).text().not_null())
                    .col(
                        ColumnDef::new(Prices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prices_item_league")
                    .table(Prices::Table)
                    .col(Prices::Item)
                    .col(Prices::League)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prices_source")
                    .table(Prices::Table)
                    .col(Prices::Source)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prices {
    Table,
    Id,
    Item,
    League,
    Source,
    ChaosValue,
    DivineValue,
    Payload,
    CreatedAt,
}
