//! Store access: per-call scoped connections, schema migrators, and the query repositories.

use crate::config::{CatalogConfig, SearchLogConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub mod migrator;
pub mod repositories;

/// Failure talking to one of the stores.
///
/// `Connect` covers everything up to a usable connection (including schema setup),
/// `Query` covers the operation run on it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connect(#[source] DbErr),

    #[error("Query error: {0}")]
    Query(#[source] DbErr),
}

impl StoreError {
    #[must_use]
    pub const fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

/// Schema work done right after a connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaSetup {
    None,
    Catalog,
    SearchLog,
}

impl SchemaSetup {
    async fn apply(self, conn: &DatabaseConnection) -> Result<(), DbErr> {
        match self {
            Self::None => Ok(()),
            Self::Catalog => migrator::CatalogMigrator::up(conn, None).await,
            Self::SearchLog => migrator::SearchLogMigrator::up(conn, None).await,
        }
    }
}

/// Opens one connection per operation and closes it when the operation is done.
///
/// Nothing is pooled or reused between calls.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    url: String,
    connect_timeout: Duration,
    schema: SchemaSetup,
}

impl ConnectionManager {
    #[must_use]
    pub fn catalog(config: &CatalogConfig) -> Self {
        Self {
            url: config.connection_url(),
            connect_timeout: Duration::from_secs(config.connect_timeout_seconds),
            schema: if config.bootstrap_schema {
                SchemaSetup::Catalog
            } else {
                SchemaSetup::None
            },
        }
    }

    #[must_use]
    pub fn search_log(config: &SearchLogConfig) -> Self {
        Self {
            url: config.url.clone(),
            connect_timeout: Duration::from_secs(config.connect_timeout_seconds),
            schema: SchemaSetup::SearchLog,
        }
    }

    /// Runs `op` against a freshly opened connection.
    ///
    /// The connection is closed before returning on every path, including when `op` fails.
    pub async fn scoped<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: AsyncFnOnce(&DatabaseConnection) -> Result<T, DbErr>,
    {
        let conn = self.connect().await?;
        let result = op(&conn).await.map_err(StoreError::Query);
        close(conn).await;
        result
    }

    async fn connect(&self) -> Result<DatabaseConnection, StoreError> {
        prepare_sqlite_file(&self.url);

        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .sqlx_logging(false);

        let conn = Database::connect(opt).await.map_err(|e| {
            warn!(error = %e, "Failed to connect to store");
            StoreError::Connect(e)
        })?;

        if let Err(e) = self.schema.apply(&conn).await {
            warn!(error = %e, schema = ?self.schema, "Failed to prepare store schema");
            close(conn).await;
            return Err(StoreError::Connect(e));
        }

        debug!(schema = ?self.schema, "Store connection opened");
        Ok(conn)
    }
}

async fn close(conn: DatabaseConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close store connection");
    }
}

/// `SQLite` refuses to open a missing file unless asked to create it, so make sure the file
/// and its directory exist. Failures are left for the connect call to report.
fn prepare_sqlite_file(url: &str) {
    let Some(rest) = url.strip_prefix("sqlite:") else {
        return;
    };
    let path_str = rest.trim_start_matches("//");
    let path_str = path_str.split('?').next().unwrap_or_default();

    if path_str.is_empty() || path_str.starts_with(":memory:") {
        return;
    }

    let path = Path::new(path_str);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).ok();
    }
    if !path.exists() {
        std::fs::File::create(path).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_sqlite_file_creates_parent_and_file() {
        let dir = std::env::temp_dir().join(format!("cinesearch-db-{}", std::process::id()));
        let file = dir.join("nested").join("log.db");
        let url = format!("sqlite:{}?mode=rwc", file.display());

        prepare_sqlite_file(&url);

        assert!(file.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_prepare_sqlite_file_ignores_other_backends() {
        prepare_sqlite_file("mysql://root@localhost:3306/sakila");
        prepare_sqlite_file("sqlite::memory:");
    }

    #[test]
    fn test_catalog_manager_only_migrates_when_bootstrapping() {
        let mut config = CatalogConfig::default();
        assert_eq!(ConnectionManager::catalog(&config).schema, SchemaSetup::None);

        config.bootstrap_schema = true;
        assert_eq!(ConnectionManager::catalog(&config).schema, SchemaSetup::Catalog);
    }
}
