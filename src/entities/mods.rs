//! `SeaORM` Entity for mods table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub base: String,
    #[sea_orm(column_name = "type")]
    pub mod_type: String,
    pub domain: String,
    pub generation_type: String,
    #[sea_orm(column_type = "Text")]
    pub full_text: String,
    pub group_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub spawn_weights_json: String,
    #[sea_orm(column_type = "Text")]
    pub tags_json: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
