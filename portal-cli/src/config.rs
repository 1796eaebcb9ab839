//! Configuration module
//!
//! Handles CLI configuration: the portal API URL and the database URL used
//! by the `db` maintenance commands.

use anyhow::{Result, anyhow};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the portal API
    pub api_url: String,
    /// Postgres connection string for maintenance commands
    pub database_url: Option<String>,
}

impl Config {
    /// Build the configuration, using `fallback_database_url` when no
    /// database URL was given explicitly
    pub fn new(
        api_url: String,
        database_url: Option<String>,
        fallback_database_url: Option<String>,
    ) -> Self {
        let database_url = database_url
            .or(fallback_database_url)
            .filter(|url| !url.trim().is_empty());

        Self {
            api_url,
            database_url,
        }
    }

    /// Database URL, required by every `db` command
    pub fn database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            anyhow!("No database configured: pass --database-url or set DATABASE_URL / NEON_DATABASE_URL")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_url_wins() {
        let config = Config::new(
            "http://localhost:8787".into(),
            Some("postgres://a".into()),
            Some("postgres://neon".into()),
        );
        assert_eq!(config.database_url().unwrap(), "postgres://a");
    }

    #[test]
    fn test_falls_back_to_neon_url() {
        let config = Config::new("http://localhost:8787".into(), None, Some("postgres://neon".into()));
        assert_eq!(config.database_url().unwrap(), "postgres://neon");
    }

    #[test]
    fn test_missing_database_url() {
        let config = Config::new("http://localhost:8787".into(), None, Some("  ".into()));
        assert!(config.database_url().is_err());
    }
}
