//! Schema-reading strategies
//!
//! [`select_reader`] probes a [`DataConnection`] and picks exactly one
//! strategy, first available wins:
//!
//! 1. [`LegacySchemaReader`] when the connection exposes [`LegacySchemaApi`]
//! 2. [`ModernSchemaReader`] when it exposes [`ModernSchemaApi`]
//! 3. [`NativeSchemaReader`] otherwise (column names only)
//!
//! [`LegacySchemaApi`]: super::LegacySchemaApi
//! [`ModernSchemaApi`]: super::ModernSchemaApi

use super::{ColumnDescriptor, DataConnection, QualifiedTable, SchemaManager, TypePlatform};
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Which strategy a reader uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaBackend {
    /// Per-table schema manager (older API shape)
    Legacy,
    /// Connection-level schema manager (newer API shape)
    Modern,
    /// Column names only
    Native,
}

impl fmt::Display for SchemaBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy schema manager",
            Self::Modern => "schema manager",
            Self::Native => "native column listing",
        })
    }
}

/// Turns a model table name into ordered column descriptors
#[async_trait]
pub trait SchemaReader: Send + Sync {
    /// Strategy implemented by this reader
    fn backend(&self) -> SchemaBackend;

    /// Read the columns of `table` (unprefixed, possibly `database.table`)
    async fn read_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

/// Pick the richest reader the connection supports
#[must_use]
pub fn select_reader(connection: Arc<dyn DataConnection>) -> Box<dyn SchemaReader> {
    let reader: Box<dyn SchemaReader> = if connection.legacy_schema().is_some() {
        Box::new(LegacySchemaReader::new(connection))
    } else if connection.modern_schema().is_some() {
        Box::new(ModernSchemaReader::new(connection))
    } else {
        Box::new(NativeSchemaReader::new(connection))
    };
    tracing::debug!(backend = %reader.backend(), "schema reader selected");
    reader
}

fn prefixed(connection: &dyn DataConnection, table: &str) -> String {
    format!("{}{table}", connection.table_prefix())
}

async fn list_with(
    manager: &dyn SchemaManager,
    mut platform: TypePlatform,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    platform.register_string_overrides();

    let qualified = QualifiedTable::parse(table);
    tracing::debug!(
        table = %qualified.table,
        database = ?qualified.database,
        "listing table columns"
    );

    let columns = manager
        .list_table_columns(&qualified.table, qualified.database.as_deref())
        .await?;

    Ok(columns
        .into_iter()
        .map(|column| platform.describe(column))
        .collect())
}

/// Reads full column metadata through the older schema API shape
pub struct LegacySchemaReader {
    connection: Arc<dyn DataConnection>,
}

impl LegacySchemaReader {
    /// Create a reader over a connection
    pub fn new(connection: Arc<dyn DataConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SchemaReader for LegacySchemaReader {
    fn backend(&self) -> SchemaBackend {
        SchemaBackend::Legacy
    }

    async fn read_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let api = self.connection.legacy_schema().ok_or_else(|| {
            ScaffoldError::SchemaUnavailable(
                "connection does not expose the legacy schema API".to_string(),
            )
        })?;

        let table = prefixed(self.connection.as_ref(), table);
        let manager = api.schema_manager(&table);
        let platform = manager.platform();
        list_with(manager.as_ref(), platform, &table).await
    }
}

/// Reads full column metadata through the newer schema API shape
pub struct ModernSchemaReader {
    connection: Arc<dyn DataConnection>,
}

impl ModernSchemaReader {
    /// Create a reader over a connection
    pub fn new(connection: Arc<dyn DataConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SchemaReader for ModernSchemaReader {
    fn backend(&self) -> SchemaBackend {
        SchemaBackend::Modern
    }

    async fn read_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let api = self.connection.modern_schema().ok_or_else(|| {
            ScaffoldError::SchemaUnavailable(
                "connection does not expose the schema manager API".to_string(),
            )
        })?;

        let table = prefixed(self.connection.as_ref(), table);
        let manager = api.create_schema_manager();
        list_with(manager.as_ref(), api.database_platform(), &table).await
    }
}

/// Reads column names only; every column becomes `string` with no default
///
/// The table name is used as-is after prefixing, without splitting a
/// database qualifier.
pub struct NativeSchemaReader {
    connection: Arc<dyn DataConnection>,
}

impl NativeSchemaReader {
    /// Create a reader over a connection
    pub fn new(connection: Arc<dyn DataConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SchemaReader for NativeSchemaReader {
    fn backend(&self) -> SchemaBackend {
        SchemaBackend::Native
    }

    async fn read_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let table = prefixed(self.connection.as_ref(), table);
        tracing::debug!(table = %table, "listing column names");

        let names = self.connection.column_listing(&table).await?;
        Ok(names.into_iter().map(ColumnDescriptor::name_only).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NativeColumn, SqlType};
    use crate::testing::{SchemaApi, StaticConnection};

    fn users() -> Vec<NativeColumn> {
        vec![
            NativeColumn::new("id", "bigint"),
            NativeColumn::new("name", "varchar(255)").with_default("guest"),
            NativeColumn::new("location", "point"),
            NativeColumn::new("active", "boolean").with_default("1"),
        ]
    }

    #[test]
    fn test_select_by_capability() {
        let legacy = Arc::new(StaticConnection::new(SchemaApi::Legacy));
        let modern = Arc::new(StaticConnection::new(SchemaApi::Modern));
        let native = Arc::new(StaticConnection::new(SchemaApi::NativeOnly));

        assert_eq!(select_reader(legacy).backend(), SchemaBackend::Legacy);
        assert_eq!(select_reader(modern).backend(), SchemaBackend::Modern);
        assert_eq!(select_reader(native).backend(), SchemaBackend::Native);
    }

    #[test]
    fn test_legacy_preferred_over_modern() {
        let both = Arc::new(StaticConnection::new(SchemaApi::Both));
        assert_eq!(select_reader(both).backend(), SchemaBackend::Legacy);
    }

    #[tokio::test]
    async fn test_legacy_reads_types_and_defaults() {
        let connection = Arc::new(StaticConnection::new(SchemaApi::Legacy).with_table("users", users()));
        let columns = LegacySchemaReader::new(connection).read_columns("users").await.unwrap();

        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "location", "active"]);
        assert_eq!(columns[0].sql_type, SqlType::BigInt);
        assert_eq!(columns[1].default.as_deref(), Some("guest"));
        assert_eq!(columns[2].sql_type, SqlType::String);
        assert_eq!(columns[3].sql_type, SqlType::Boolean);
    }

    #[tokio::test]
    async fn test_modern_reads_types_and_defaults() {
        let connection = Arc::new(StaticConnection::new(SchemaApi::Modern).with_table("users", users()));
        let columns = ModernSchemaReader::new(connection).read_columns("users").await.unwrap();

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[2].sql_type, SqlType::String);
    }

    #[tokio::test]
    async fn test_qualified_name_split_for_enhanced_tiers() {
        for api in [SchemaApi::Legacy, SchemaApi::Modern] {
            let connection = Arc::new(
                StaticConnection::new(api).with_qualified_table("mydb", "users", users()),
            );
            let reader = select_reader(connection.clone());
            let columns = reader.read_columns("mydb.users").await.unwrap();

            assert_eq!(columns.len(), 4);
            assert_eq!(
                connection.listed(),
                vec![("users".to_string(), Some("mydb".to_string()))]
            );
        }
    }

    #[tokio::test]
    async fn test_prefix_applied_before_split() {
        let connection = Arc::new(
            StaticConnection::new(SchemaApi::Legacy)
                .with_prefix("wp_")
                .with_table("wp_users", users()),
        );
        let reader = select_reader(connection.clone());
        reader.read_columns("users").await.unwrap();

        assert_eq!(connection.listed(), vec![("wp_users".to_string(), None)]);
    }

    #[tokio::test]
    async fn test_native_forces_string_without_default() {
        let connection = Arc::new(
            StaticConnection::new(SchemaApi::NativeOnly)
                .with_prefix("app_")
                .with_table("app_users", users()),
        );
        let columns = NativeSchemaReader::new(connection).read_columns("users").await.unwrap();

        assert_eq!(columns.len(), 4);
        for column in &columns {
            assert_eq!(column.sql_type, SqlType::String);
            assert_eq!(column.default, None);
        }
    }

    #[tokio::test]
    async fn test_reader_without_capability_is_unavailable() {
        let connection = Arc::new(StaticConnection::new(SchemaApi::NativeOnly));
        let result = ModernSchemaReader::new(connection).read_columns("users").await;
        assert!(matches!(result, Err(ScaffoldError::SchemaUnavailable(_))));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let connection = Arc::new(StaticConnection::new(SchemaApi::Legacy).failing());
        let result = select_reader(connection).read_columns("users").await;
        assert!(matches!(result, Err(ScaffoldError::Database(_))));
    }
}
