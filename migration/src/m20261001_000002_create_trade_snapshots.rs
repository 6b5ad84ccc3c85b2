use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TradeStatic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TradeStatic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TradeStatic::Payload).text().not_null())
                    .col(
                        ColumnDef::new(TradeStatic::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TradeStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TradeStats::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TradeStats::Payload).text().not_null())
                    .col(
                        ColumnDef::new(TradeStats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TradeStats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TradeStatic::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TradeStatic {
    Table,
    Id,
    Payload,
    CreatedAt,
}

#[derive(Iden)]
enum TradeStats {
    Table,
    Id,
    Payload,
    CreatedAt,
}
