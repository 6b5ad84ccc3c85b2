//! `SeaORM` Entity for the append-only prices table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item: String,
    pub league: String,
    /// Upstream aggregator tag: 'ninja' or 'watch'
    pub source: String,
    #[sea_orm(column_type = "Double")]
    pub chaos_value: f64,
    #[sea_orm(column_type = "Double")]
    pub divine_value: f64,
    /// Raw upstream line, serialized JSON
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
