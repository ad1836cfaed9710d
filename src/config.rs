use crate::error::ConfigError;

const DATABASE_PATH_KEY: &str = "WILDLIFE_DB_PATH";
const MAX_RESULTS_KEY: &str = "WILDLIFE_MAX_RESULTS";

const DEFAULT_DATABASE_PATH: &str = "db.sqlite";
const DEFAULT_MAX_RESULTS: usize = 10;

/// Bot settings. The Telegram token itself is read by teloxide from
/// `TELOXIDE_TOKEN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding each chat's dialogue state.
    pub database_path: String,
    /// Longest list rendered in a single reply.
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    /// Reads the process environment. Load `.env` first to have it apply.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATABASE_PATH_KEY).filter(|p| !p.trim().is_empty()) {
            config.database_path = path;
        }

        if let Some(raw) = lookup(MAX_RESULTS_KEY) {
            config.max_results = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::NotAPositiveInteger {
                        key: MAX_RESULTS_KEY,
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}
