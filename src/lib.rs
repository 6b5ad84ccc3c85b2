// src/lib.rs

pub mod entities {
    pub mod prelude;
    pub mod bases;
    pub mod mod_groups;
    pub mod mods;
    pub mod passive_tree;
    pub mod prices;
    pub mod tags;
    pub mod trade_static;
    pub mod trade_stats;
}

pub mod services {
    pub mod fallback;
    pub mod http_cache;
    pub mod poe_ninja;
    pub mod poe_watch;
    pub mod price_utils;
    pub mod repoe;
    pub mod retry;
    pub mod trade_api;
}

pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod pob;
pub mod scrapers;
