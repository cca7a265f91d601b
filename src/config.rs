use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{OrmError, Result};
use crate::dialect::{Dialect, H2Dialect, MySqlDialect, PostgresDialect};
use crate::entity::EntityManagerImpl;
use crate::interface::StatementExecutor;
use crate::template::SqlTemplate;

const URL_SCHEME: &str = "rustmemorm:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    H2,
    Postgres,
    MySql,
}

impl FromStr for DialectKind {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h2" => Ok(Self::H2),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            other => Err(OrmError::Config(format!("unknown dialect '{}'", other))),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H2 => write!(f, "h2"),
            Self::Postgres => write!(f, "postgres"),
            Self::MySql => write!(f, "mysql"),
        }
    }
}

/// ORM settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// SQL flavour the builders emit
    pub dialect: DialectKind,

    /// Log generated SQL at `info` instead of `debug`
    pub show_sql: bool,

    /// Logical database name, only used in logs
    pub database: String,
}

impl Default for OrmConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            show_sql: false,
            database: "rustmemorm".to_string(),
        }
    }
}

impl OrmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialect
    pub fn dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set SQL logging
    pub fn show_sql(mut self, show_sql: bool) -> Self {
        self.show_sql = show_sql;
        self
    }

    /// Set the database name
    pub fn database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Parse from a connection-style string
    ///
    /// Format: "rustmemorm:<dialect>:<database>[?show_sql=true]"
    ///
    /// # Examples
    ///
    /// ```
    /// use rustmemorm::{DialectKind, OrmConfig};
    ///
    /// let config = OrmConfig::from_url("rustmemorm:postgres:shop?show_sql=true").unwrap();
    /// assert_eq!(config.dialect, DialectKind::Postgres);
    /// assert_eq!(config.database, "shop");
    /// assert!(config.show_sql);
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix(URL_SCHEME)
            .ok_or_else(|| OrmError::Config(format!("URL must start with '{}'", URL_SCHEME)))?;

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        let (dialect, database) = path
            .split_once(':')
            .ok_or_else(|| OrmError::Config("expected '<dialect>:<database>'".to_string()))?;

        let mut config = Self::new()
            .dialect(dialect.parse()?)
            .database(database);

        for param in query.into_iter().flat_map(|q| q.split('&')).filter(|p| !p.is_empty()) {
            let (key, value) = param.split_once('=').unwrap_or((param, "true"));
            match key {
                "show_sql" => {
                    config.show_sql = value.parse().map_err(|_| {
                        OrmError::Config(format!("invalid show_sql value '{}'", value))
                    })?;
                }
                other => {
                    return Err(OrmError::Config(format!("unknown parameter '{}'", other)));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| OrmError::Config(format!("invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(OrmError::Config("database name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn dialect_impl(&self) -> Arc<dyn Dialect> {
        match self.dialect {
            DialectKind::H2 => Arc::new(H2Dialect),
            DialectKind::Postgres => Arc::new(PostgresDialect),
            DialectKind::MySql => Arc::new(MySqlDialect),
        }
    }

    pub fn template(&self, executor: Arc<dyn StatementExecutor>) -> SqlTemplate {
        SqlTemplate::new(executor).with_show_sql(self.show_sql)
    }

    pub fn entity_manager(&self, executor: Arc<dyn StatementExecutor>) -> EntityManagerImpl {
        tracing::debug!(database = %self.database, dialect = %self.dialect, "creating entity manager");
        EntityManagerImpl::new(self.template(executor), self.dialect_impl())
    }
}
