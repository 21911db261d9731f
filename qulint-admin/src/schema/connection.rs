//! Data connection capabilities
//!
//! A [`DataConnection`] always offers a name-only column listing. Richer
//! backends additionally expose one of two schema-manager API shapes:
//!
//! - [`LegacySchemaApi`]: the connection hands out a schema manager for a
//!   table, and the type platform is obtained from that manager.
//! - [`ModernSchemaApi`]: the connection creates a table-independent schema
//!   manager and exposes the type platform itself.

use super::{NativeColumn, PgConnection, SqliteConnection, TypePlatform};
use crate::config::DatabaseSettings;
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::sync::Arc;

/// Lists detailed column metadata for tables
#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Type platform used to resolve native type names
    fn platform(&self) -> TypePlatform {
        TypePlatform::default()
    }

    /// List the columns of `table`, optionally inside `database`, in ordinal order
    async fn list_table_columns(
        &self,
        table: &str,
        database: Option<&str>,
    ) -> Result<Vec<NativeColumn>>;
}

/// Older schema API shape: per-table schema managers
pub trait LegacySchemaApi: Send + Sync {
    /// Schema manager for the given (prefixed) table name
    fn schema_manager(&self, table: &str) -> Box<dyn SchemaManager>;
}

/// Newer schema API shape: connection-level schema manager and platform
pub trait ModernSchemaApi: Send + Sync {
    /// Create a schema manager bound to this connection
    fn create_schema_manager(&self) -> Box<dyn SchemaManager>;

    /// Type platform of this connection
    fn database_platform(&self) -> TypePlatform;
}

/// Active data connection of a model
#[async_trait]
pub trait DataConnection: Send + Sync {
    /// Prefix prepended to every table name
    fn table_prefix(&self) -> &str {
        ""
    }

    /// Older schema API, when this connection offers it
    fn legacy_schema(&self) -> Option<&dyn LegacySchemaApi> {
        None
    }

    /// Newer schema API, when this connection offers it
    fn modern_schema(&self) -> Option<&dyn ModernSchemaApi> {
        None
    }

    /// Column names of `table`, in ordinal order
    async fn column_listing(&self, table: &str) -> Result<Vec<String>>;
}

/// Wraps a connection and hides both schema manager APIs
///
/// Generation through this wrapper always takes the name-only native path.
pub struct NameOnlyConnection {
    inner: Arc<dyn DataConnection>,
}

impl NameOnlyConnection {
    /// Wrap an existing connection
    pub fn new(inner: Arc<dyn DataConnection>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DataConnection for NameOnlyConnection {
    fn table_prefix(&self) -> &str {
        self.inner.table_prefix()
    }

    async fn column_listing(&self, table: &str) -> Result<Vec<String>> {
        self.inner.column_listing(table).await
    }
}

/// Open a data connection from database settings
///
/// The backend is chosen from the URL scheme: `sqlite:` opens a
/// [`SqliteConnection`], `postgres:` or `postgresql:` a [`PgConnection`].
///
/// # Errors
///
/// Returns an error if:
/// - No database URL is configured
/// - The URL scheme is not supported
/// - The database cannot be reached
pub async fn connect(settings: &DatabaseSettings) -> Result<Arc<dyn DataConnection>> {
    let url = settings
        .url
        .as_deref()
        .ok_or_else(|| ScaffoldError::Config("database.url is not set".to_string()))?;

    let connection: Arc<dyn DataConnection> = if url.starts_with("sqlite:") {
        let pool = sqlx::SqlitePool::connect(url).await?;
        Arc::new(SqliteConnection::new(pool).with_prefix(&settings.table_prefix))
    } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        let pool = sqlx::PgPool::connect(url).await?;
        Arc::new(PgConnection::new(pool).with_prefix(&settings.table_prefix))
    } else {
        let scheme = url.split(':').next().unwrap_or_default();
        return Err(ScaffoldError::Config(format!(
            "unsupported database scheme '{scheme}' (expected sqlite or postgres)"
        )));
    };

    tracing::debug!(
        introspection = settings.introspection,
        prefix = %settings.table_prefix,
        "database connection opened"
    );

    if settings.introspection {
        Ok(connection)
    } else {
        Ok(Arc::new(NameOnlyConnection::new(connection)))
    }
}
