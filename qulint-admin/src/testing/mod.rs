//! Testing utilities for scaffold generation
//!
//! - [`StaticConnection`] - in-memory [`DataConnection`] exposing a chosen
//!   schema API shape, with call recording
//! - [`create_sqlite_pool`] - in-memory SQLite pool for backend tests
//! - [`TestDatabase`] - throwaway PostgreSQL schema for backend tests
//!
//! # Example
//!
//! ```rust
//! use qulint_admin::schema::NativeColumn;
//! use qulint_admin::testing::{SchemaApi, StaticConnection};
//!
//! let connection = StaticConnection::new(SchemaApi::Modern).with_table(
//!     "posts",
//!     vec![
//!         NativeColumn::new("id", "bigint"),
//!         NativeColumn::new("title", "varchar(255)"),
//!     ],
//! );
//! ```

pub mod database;

pub use database::{create_sqlite_pool, TestDatabase};

use crate::error::{Result, ScaffoldError};
use crate::schema::{
    DataConnection, LegacySchemaApi, ModernSchemaApi, NativeColumn, QualifiedTable,
    SchemaManager, TypePlatform,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type TableKey = (Option<String>, String);
type ListedCalls = Arc<Mutex<Vec<(String, Option<String>)>>>;

/// Which schema API shape a [`StaticConnection`] exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaApi {
    /// Only the older per-table manager API
    Legacy,
    /// Only the newer connection-level manager API
    Modern,
    /// Both manager APIs
    Both,
    /// Neither; only the native column listing
    NativeOnly,
}

/// In-memory data connection for tests
pub struct StaticConnection {
    api: SchemaApi,
    prefix: String,
    tables: HashMap<TableKey, Vec<NativeColumn>>,
    listed: ListedCalls,
    failing: bool,
}

impl StaticConnection {
    /// Create an empty connection exposing `api`
    #[must_use]
    pub fn new(api: SchemaApi) -> Self {
        Self {
            api,
            prefix: String::new(),
            tables: HashMap::new(),
            listed: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    /// Set the table prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Add an unqualified table (name as stored, including any prefix)
    #[must_use]
    pub fn with_table(mut self, table: &str, columns: Vec<NativeColumn>) -> Self {
        self.tables.insert((None, table.to_string()), columns);
        self
    }

    /// Add a table inside a named database
    #[must_use]
    pub fn with_qualified_table(
        mut self,
        database: &str,
        table: &str,
        columns: Vec<NativeColumn>,
    ) -> Self {
        self.tables
            .insert((Some(database.to_string()), table.to_string()), columns);
        self
    }

    /// Make every schema call fail with a database error
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// `(table, database)` pairs passed to schema managers so far
    #[must_use]
    pub fn listed(&self) -> Vec<(String, Option<String>)> {
        self.listed.lock().clone()
    }

    fn manager(&self) -> Box<dyn SchemaManager> {
        Box::new(StaticSchemaManager {
            tables: self.tables.clone(),
            listed: Arc::clone(&self.listed),
            failing: self.failing,
        })
    }
}

fn backend_failure() -> ScaffoldError {
    ScaffoldError::Database(sqlx::Error::Protocol(
        "static connection configured to fail".to_string(),
    ))
}

struct StaticSchemaManager {
    tables: HashMap<TableKey, Vec<NativeColumn>>,
    listed: ListedCalls,
    failing: bool,
}

#[async_trait]
impl SchemaManager for StaticSchemaManager {
    async fn list_table_columns(
        &self,
        table: &str,
        database: Option<&str>,
    ) -> Result<Vec<NativeColumn>> {
        self.listed
            .lock()
            .push((table.to_string(), database.map(str::to_string)));

        if self.failing {
            return Err(backend_failure());
        }

        let key = (database.map(str::to_string), table.to_string());
        Ok(self.tables.get(&key).cloned().unwrap_or_default())
    }
}

impl LegacySchemaApi for StaticConnection {
    fn schema_manager(&self, _table: &str) -> Box<dyn SchemaManager> {
        self.manager()
    }
}

impl ModernSchemaApi for StaticConnection {
    fn create_schema_manager(&self) -> Box<dyn SchemaManager> {
        self.manager()
    }

    fn database_platform(&self) -> TypePlatform {
        TypePlatform::default()
    }
}

#[async_trait]
impl DataConnection for StaticConnection {
    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn legacy_schema(&self) -> Option<&dyn LegacySchemaApi> {
        matches!(self.api, SchemaApi::Legacy | SchemaApi::Both)
            .then_some(self as &dyn LegacySchemaApi)
    }

    fn modern_schema(&self) -> Option<&dyn ModernSchemaApi> {
        matches!(self.api, SchemaApi::Modern | SchemaApi::Both)
            .then_some(self as &dyn ModernSchemaApi)
    }

    async fn column_listing(&self, table: &str) -> Result<Vec<String>> {
        if self.failing {
            return Err(backend_failure());
        }

        let columns = self
            .tables
            .get(&(None, table.to_string()))
            .or_else(|| {
                let qualified = QualifiedTable::parse(table);
                self.tables.get(&(qualified.database, qualified.table))
            })
            .map(|columns| columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default();

        Ok(columns)
    }
}
