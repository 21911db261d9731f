//! PostgreSQL schema backend
//!
//! Exposes the newer schema API shape: the connection creates a schema
//! manager and owns the type platform. Columns come from
//! `information_schema.columns`; a database qualifier names a schema, and
//! unqualified tables resolve against `current_schema()`.

use super::{
    normalize_default, DataConnection, ModernSchemaApi, NativeColumn, SchemaManager, TypePlatform,
};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

const COLUMNS_QUERY: &str = "
    SELECT column_name::text AS column_name,
           CASE
               WHEN data_type = 'USER-DEFINED' THEN udt_name::text
               WHEN data_type = 'ARRAY' THEN 'array'
               ELSE data_type::text
           END AS native_type,
           column_default::text AS column_default
    FROM information_schema.columns
    WHERE table_name = $1
      AND table_schema = COALESCE($2::text, current_schema())
    ORDER BY ordinal_position";

const COLUMN_NAMES_QUERY: &str = "
    SELECT column_name::text
    FROM information_schema.columns
    WHERE table_name = $1
      AND table_schema = current_schema()
    ORDER BY ordinal_position";

/// PostgreSQL data connection
#[derive(Debug, Clone)]
pub struct PgConnection {
    pool: PgPool,
    prefix: String,
}

impl PgConnection {
    /// Wrap a PostgreSQL pool
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
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

struct PgSchemaManager {
    pool: PgPool,
}

#[async_trait]
impl SchemaManager for PgSchemaManager {
    async fn list_table_columns(
        &self,
        table: &str,
        database: Option<&str>,
    ) -> Result<Vec<NativeColumn>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(table)
            .bind(database)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<NativeColumn> {
                let default: Option<String> = row.try_get("column_default")?;
                Ok(NativeColumn {
                    name: row.try_get("column_name")?,
                    native_type: row.try_get("native_type")?,
                    default: default.as_deref().and_then(normalize_default),
                })
            })
            .collect()
    }
}

impl ModernSchemaApi for PgConnection {
    fn create_schema_manager(&self) -> Box<dyn SchemaManager> {
        Box::new(PgSchemaManager {
            pool: self.pool.clone(),
        })
    }

    fn database_platform(&self) -> TypePlatform {
        TypePlatform::default()
    }
}

#[async_trait]
impl DataConnection for PgConnection {
    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn modern_schema(&self) -> Option<&dyn ModernSchemaApi> {
        Some(self)
    }

    async fn column_listing(&self, table: &str) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(COLUMN_NAMES_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}
