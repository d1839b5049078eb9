use std::env;
use std::path::PathBuf;

use crate::catalog::DEFAULT_SEARCH_LIMIT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("COLLEGE_FIT_SEARCH_LIMIT must be a positive integer, got '{0}'")]
    InvalidSearchLimit(String),
}

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub catalog_path: Option<PathBuf>,
    pub search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            catalog_path: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup("COLLEGE_FIT_LOG_LEVEL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let catalog_path = lookup("COLLEGE_FIT_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let search_limit = match lookup("COLLEGE_FIT_SEARCH_LIMIT") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidSearchLimit(raw)),
            },
            None => defaults.search_limit,
        };

        Ok(Self {
            log_level,
            catalog_path,
            search_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_limit, 15);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("COLLEGE_FIT_LOG_LEVEL", "debug"),
            ("COLLEGE_FIT_CATALOG", "/srv/colleges.csv"),
            ("COLLEGE_FIT_SEARCH_LIMIT", "5"),
        ]))
        .expect("config");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/colleges.csv")));
        assert_eq!(config.search_limit, 5);
    }

    #[test]
    fn rejects_bad_search_limit() {
        for raw in ["0", "many"] {
            let err = AppConfig::from_lookup(lookup_from(&[("COLLEGE_FIT_SEARCH_LIMIT", raw)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSearchLimit(_)));
        }
    }
}
