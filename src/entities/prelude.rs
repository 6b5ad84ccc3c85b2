//! `SeaORM` Entity prelude

pub use super::bases::Entity as Bases;
pub use super::mod_groups::Entity as ModGroups;
pub use super::mods::Entity as Mods;
pub use super::passive_tree::Entity as PassiveTree;
pub use super::prices::Entity as Prices;
pub use super::tags::Entity as Tags;
pub use super::trade_static::Entity as TradeStatic;
pub use super::trade_stats::Entity as TradeStats;
