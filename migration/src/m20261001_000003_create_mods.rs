use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mods::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Mods::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Mods::Base).string().not_null().default(""))
                    .col(ColumnDef::new(Mods::Type).string().not_null().default(""))
                    .col(ColumnDef::new(Mods::Domain).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Mods::GenerationType)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Mods::FullText).text().not_null().default(""))
                    .col(ColumnDef::new(Mods::GroupId).string().null())
                    .col(
                        ColumnDef::new(Mods::SpawnWeightsJson)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Mods::TagsJson).text().not_null().default("[]"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mods_base")
                    .table(Mods::Table)
                    .col(Mods::Base)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mods_group")
                    .table(Mods::Table)
                    .col(Mods::GroupId)
                    .to_owned(),
            )
            .await?;

        // Lookup tables derived from the mods of each seed run
        manager
            .create_table(
                Table::create()
                    .table(ModGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ModGroups::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(ModGroups::Label).text().not_null().default(""))
                    .col(ColumnDef::new(ModGroups::Type).string().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Tags::Description).text().not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bases::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Bases::Name).string().not_null().default(""))
                    .col(ColumnDef::new(Bases::TagsJson).text().not_null().default("[]"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Mods::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Mods {
    Table,
    Id,
    Base,
    Type,
    Domain,
    GenerationType,
    FullText,
    GroupId,
    SpawnWeightsJson,
    TagsJson,
}

#[derive(Iden)]
enum ModGroups {
    Table,
    Id,
    Label,
    Type,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Description,
}

#[derive(Iden)]
enum Bases {
    Table,
    Id,
    Name,
    TagsJson,
}
