//! Model handles and the model registry
//!
//! A [`Model`] is the generator's view of a persisted entity: the table it
//! lives in, its reserved column names, and the connection its schema is read
//! through. Models are never mutated by generation.
//!
//! [`ModelRegistry`] resolves model identifiers the way an ORM resolves class
//! names: an identifier must exist and must name a persisted entity.

use crate::error::{Result, ScaffoldError};
use crate::scaffold::TemplateHelpers;
use crate::schema::DataConnection;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Column holding the soft-delete marker
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";

/// A persisted entity handle
pub trait Model: Send + Sync {
    /// Table name, unprefixed, optionally `database.table`
    fn table(&self) -> String;

    /// Primary key column
    fn key_name(&self) -> &str {
        "id"
    }

    /// Created-at timestamp column
    fn created_at_column(&self) -> &str {
        "created_at"
    }

    /// Updated-at timestamp column
    fn updated_at_column(&self) -> &str {
        "updated_at"
    }

    /// Connection the model's schema is read through
    fn connection(&self) -> Arc<dyn DataConnection>;
}

/// Model backed by an explicit table declaration
#[derive(Clone)]
pub struct TableModel {
    name: String,
    table: String,
    key_name: String,
    created_at: String,
    updated_at: String,
    connection: Arc<dyn DataConnection>,
}

impl TableModel {
    /// Create a model for `name`, stored in the plural snake case table
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use qulint_admin::model::{Model, TableModel};
    /// # use qulint_admin::testing::{SchemaApi, StaticConnection};
    /// let connection = Arc::new(StaticConnection::new(SchemaApi::NativeOnly));
    /// let model = TableModel::for_name("UserProfile", connection);
    /// assert_eq!(model.table(), "user_profiles");
    /// assert_eq!(model.key_name(), "id");
    /// ```
    pub fn for_name(name: &str, connection: Arc<dyn DataConnection>) -> Self {
        Self {
            name: name.to_string(),
            table: TemplateHelpers::to_table_name(name),
            key_name: "id".to_string(),
            created_at: "created_at".to_string(),
            updated_at: "updated_at".to_string(),
            connection,
        }
    }

    /// Override the table name
    #[must_use]
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Override the primary key column
    #[must_use]
    pub fn with_key_name(mut self, key_name: &str) -> Self {
        self.key_name = key_name.to_string();
        self
    }

    /// Override the timestamp columns
    #[must_use]
    pub fn with_timestamps(mut self, created_at: &str, updated_at: &str) -> Self {
        self.created_at = created_at.to_string();
        self.updated_at = updated_at.to_string();
        self
    }

    /// Model identifier
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("key_name", &self.key_name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

impl Model for TableModel {
    fn table(&self) -> String {
        self.table.clone()
    }

    fn key_name(&self) -> &str {
        &self.key_name
    }

    fn created_at_column(&self) -> &str {
        &self.created_at
    }

    fn updated_at_column(&self) -> &str {
        &self.updated_at
    }

    fn connection(&self) -> Arc<dyn DataConnection> {
        Arc::clone(&self.connection)
    }
}

enum ModelEntry {
    Entity(Arc<dyn Model>),
    Abstract,
}

/// Known model identifiers
#[derive(Default)]
pub struct ModelRegistry {
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a persisted entity under `name`
    pub fn register(&mut self, name: &str, model: Arc<dyn Model>) {
        self.entries
            .insert(name.to_string(), ModelEntry::Entity(model));
    }

    /// Record `name` as a known type that is not a persisted entity
    pub fn declare_abstract(&mut self, name: &str) {
        self.entries.insert(name.to_string(), ModelEntry::Abstract);
    }

    /// Resolve an identifier to a model handle
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidModel`] if `name` is unknown or does
    /// not name a persisted entity
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Model>> {
        match self.entries.get(name) {
            Some(ModelEntry::Entity(model)) => Ok(Arc::clone(model)),
            Some(ModelEntry::Abstract) | None => Err(ScaffoldError::InvalidModel(name.to_string())),
        }
    }

    /// Identifiers of every registered entity, sorted
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(name, entry)| match entry {
            ModelEntry::Entity(_) => Some(name.as_str()),
            ModelEntry::Abstract => None,
        })
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
