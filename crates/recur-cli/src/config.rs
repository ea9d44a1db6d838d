use figment::{Figment, providers::{Format, Toml, Env}};
use recur_core::models::DEFAULT_SEARCH_LIMIT;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Maximum number of tasks returned by `list`
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database_path() -> String {
    "scheduler.db".to_string()
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            search_limit: default_search_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("RECUR_")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}
