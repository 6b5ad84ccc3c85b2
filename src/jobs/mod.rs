pub mod mod_seed;
pub mod passive_tree_seed;
pub mod price_refresh;
pub mod trade_stats_refresh;
