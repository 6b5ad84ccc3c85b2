use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://db/craftcoach.db?mode=rwc";
pub const DEFAULT_CACHE_DIR: &str = "data/.cache";
pub const DEFAULT_STATIC_DIR: &str = "data/static";
pub const DEFAULT_LEAGUE: &str = "Standard";
pub const DEFAULT_USER_AGENT: &str = "poe-craft-coach/0.1 (+https://github.com)";
/// Divine-to-chaos ratio assumed when a price line does not carry one
pub const DEFAULT_DIVINE_CHAOS_RATIO: f64 = 150.0;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Conditional-request cache (paired .meta.json/.body files)
    pub cache_dir: PathBuf,
    /// Bundled fallback documents
    pub static_dir: PathBuf,
    pub leagues: Vec<String>,
    pub user_agent: String,
    pub divine_chaos_ratio: f64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let cache_dir = env::var("CACHE_DIR").unwrap_or_else(|_| DEFAULT_CACHE_DIR.to_string());
        let static_dir =
            env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
        let leagues = parse_leagues(
            &env::var("LEAGUE").unwrap_or_else(|_| DEFAULT_LEAGUE.to_string()),
        )?;
        let user_agent =
            env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let divine_chaos_ratio = match env::var("DIVINE_CHAOS_RATIO") {
            Ok(raw) => parse_ratio(&raw)?,
            Err(_) => DEFAULT_DIVINE_CHAOS_RATIO,
        };

        Ok(AppConfig {
            database_url,
            cache_dir: PathBuf::from(cache_dir),
            static_dir: PathBuf::from(static_dir),
            leagues,
            user_agent,
            divine_chaos_ratio,
        })
    }

    /// Only `USER_AGENT`, for callers that never touch the store or prices.
    pub fn user_agent_from_env() -> String {
        dotenvy::dotenv().ok();
        env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string())
    }

    pub fn static_file(&self, name: &str) -> PathBuf {
        self.static_dir.join(name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            leagues: vec![DEFAULT_LEAGUE.to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            divine_chaos_ratio: DEFAULT_DIVINE_CHAOS_RATIO,
        }
    }
}

fn parse_leagues(raw: &str) -> Result<Vec<String>> {
    let leagues: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if leagues.is_empty() {
        return Err(Error::Config("LEAGUE must name at least one league".into()));
    }
    Ok(leagues)
}

fn parse_ratio(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Config(format!("DIVINE_CHAOS_RATIO is not a number: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leagues() {
        assert_eq!(parse_leagues("Standard").unwrap(), vec!["Standard"]);
        assert_eq!(
            parse_leagues(" Settlers , Hardcore Settlers,").unwrap(),
            vec!["Settlers", "Hardcore Settlers"]
        );
        assert!(parse_leagues(" , ").is_err());
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("180").unwrap(), 180.0);
        assert_eq!(parse_ratio(" 0.5 ").unwrap(), 0.5);
        assert!(parse_ratio("lots").is_err());
        assert!(parse_ratio("inf").is_err());
    }
}
