//! SQLite schema backend
//!
//! Exposes the older schema API shape: a schema manager is handed out per
//! table and carries its own type platform. Columns come from
//! `pragma_table_info`; a database qualifier names an attached schema.

use super::{normalize_default, DataConnection, LegacySchemaApi, NativeColumn, SchemaManager};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// SQLite data connection
#[derive(Debug, Clone)]
pub struct SqliteConnection {
    pool: SqlitePool,
    prefix: String,
}

impl SqliteConnection {
    /// Wrap a SQLite pool
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            prefix: String::new(),
        }
    }

    /// Set the table prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }
}

struct SqliteSchemaManager {
    pool: SqlitePool,
}

#[async_trait]
impl SchemaManager for SqliteSchemaManager {
    async fn list_table_columns(
        &self,
        table: &str,
        database: Option<&str>,
    ) -> Result<Vec<NativeColumn>> {
        let rows = match database {
            Some(database) => {
                sqlx::query(
                    "SELECT name, type, dflt_value FROM pragma_table_info(?1, ?2) ORDER BY cid",
                )
                .bind(table)
                .bind(database)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT name, type, dflt_value FROM pragma_table_info(?1) ORDER BY cid")
                    .bind(table)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.iter()
            .map(|row| -> Result<NativeColumn> {
                let default: Option<String> = row.try_get("dflt_value")?;
                Ok(NativeColumn {
                    name: row.try_get("name")?,
                    native_type: row.try_get("type")?,
                    default: default.as_deref().and_then(normalize_default),
                })
            })
            .collect()
    }
}

impl LegacySchemaApi for SqliteConnection {
    fn schema_manager(&self, _table: &str) -> Box<dyn SchemaManager> {
        Box::new(SqliteSchemaManager {
            pool: self.pool.clone(),
        })
    }
}

#[async_trait]
impl DataConnection for SqliteConnection {
    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn legacy_schema(&self) -> Option<&dyn LegacySchemaApi> {
        Some(self)
    }

    async fn column_listing(&self, table: &str) -> Result<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .bind(table)
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }
}
