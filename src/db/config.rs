//! Database location resolution.
//!
//! Turns a CLI flag, config file entry, or environment variable into the connection string
//! handed to the engine.

use std::error::Error;
use std::path::PathBuf;

/// Default database file when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./query_layer.sqlite";

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// A SQLite database file (or a `file:` URI).
    Sqlite { path: PathBuf },

    /// A private in-memory database, gone when the connection closes.
    Memory,
}

impl DatabaseConfig {
    /// The connection string passed to the engine.
    pub fn connection_string(&self) -> String {
        match self {
            Self::Sqlite { path } => path.display().to_string(),
            Self::Memory => ":memory:".to_string(),
        }
    }

    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `./path/to/db.sqlite` or `/absolute/path` → Sqlite
    /// - `sqlite:///path/to/db` or `sqlite://relative/db` → Sqlite
    /// - `file:db.sqlite?mode=ro` → Sqlite, URI kept verbatim for the engine
    /// - `:memory:` or `sqlite::memory:` → Memory
    pub fn from_url(url: &str) -> Result<Self, Box<dyn Error>> {
        let url = url.trim();
        if url.is_empty() {
            return Err("Database URL is empty".into());
        }

        if url == ":memory:" || url == "sqlite::memory:" {
            return Ok(Self::Memory);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(format!("Database URL '{}' has no path", url).into());
            }
            return Ok(Self::Sqlite {
                path: PathBuf::from(path),
            });
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(format!("Unsupported database scheme '{}'", scheme).into());
        }

        Ok(Self::Sqlite {
            path: PathBuf::from(url),
        })
    }

    /// Load from environment variables.
    ///
    /// Checks `QUERY_LAYER_DB` first, then `DATABASE_URL`.
    pub fn from_env() -> Result<Option<Self>, Box<dyn Error>> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `from_env` over an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in ["QUERY_LAYER_DB", "DATABASE_URL"] {
            if let Some(url) = lookup(name) {
                return Ok(Some(Self::from_url(&url)?));
            }
        }
        Ok(None)
    }

    /// Resolve the database location.
    ///
    /// Priority: explicit URL > config file > environment > `./query_layer.sqlite`.
    pub fn resolve(
        explicit: Option<&str>,
        config_file: Option<&crate::config::ConfigFile>,
    ) -> Result<Self, Box<dyn Error>> {
        if let Some(url) = explicit {
            return Self::from_url(url);
        }

        if let Some(config) = config_file {
            return Ok(config.database.to_database_config());
        }

        if let Some(config) = Self::from_env()? {
            return Ok(config);
        }

        Self::from_url(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_from_url_file_path() {
        let config = DatabaseConfig::from_url("./climbs.sqlite").unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Sqlite {
                path: PathBuf::from("./climbs.sqlite")
            }
        );
    }

    #[rstest]
    #[case(":memory:")]
    #[case("sqlite::memory:")]
    fn test_from_url_memory(#[case] url: &str) {
        assert_eq!(DatabaseConfig::from_url(url).unwrap(), DatabaseConfig::Memory);
    }

    #[rstest]
    fn test_from_url_sqlite_scheme() {
        let config = DatabaseConfig::from_url("sqlite:///tmp/climbs.db").unwrap();
        assert_eq!(
            config,
            DatabaseConfig::Sqlite {
                path: PathBuf::from("/tmp/climbs.db")
            }
        );
    }

    #[rstest]
    fn test_from_url_file_uri_kept_verbatim() {
        let config = DatabaseConfig::from_url("file:climbs.db?mode=ro").unwrap();
        assert_eq!(config.connection_string(), "file:climbs.db?mode=ro");
    }

    #[rstest]
    #[case("")]
    #[case("sqlite://")]
    #[case("postgres://user@localhost/db")]
    fn test_from_url_rejects(#[case] url: &str) {
        assert!(DatabaseConfig::from_url(url).is_err());
    }

    #[rstest]
    fn test_memory_connection_string() {
        assert_eq!(DatabaseConfig::Memory.connection_string(), ":memory:");
    }

    #[rstest]
    fn test_from_lookup_prefers_query_layer_db() {
        let config = DatabaseConfig::from_lookup(|name| match name {
            "QUERY_LAYER_DB" => Some("a.sqlite".to_string()),
            "DATABASE_URL" => Some("b.sqlite".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(
            config,
            Some(DatabaseConfig::Sqlite {
                path: PathBuf::from("a.sqlite")
            })
        );
    }

    #[rstest]
    fn test_from_lookup_falls_back_to_database_url() {
        let config = DatabaseConfig::from_lookup(|name| {
            (name == "DATABASE_URL").then(|| ":memory:".to_string())
        })
        .unwrap();
        assert_eq!(config, Some(DatabaseConfig::Memory));
    }

    #[rstest]
    fn test_from_lookup_empty() {
        assert_eq!(DatabaseConfig::from_lookup(|_| None).unwrap(), None);
    }

    #[rstest]
    fn test_resolve_explicit_wins() {
        let config = DatabaseConfig::resolve(Some(":memory:"), None).unwrap();
        assert_eq!(config, DatabaseConfig::Memory);
    }
}
