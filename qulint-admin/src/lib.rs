//! qulint-admin: schema-driven scaffolding for CRUD admin screens
//!
//! Inspects a model's table schema and generates the statements of three
//! screen definitions: a form, a detail (show) view and a listing (grid).
//! Each column is classified into a form widget kind from its type and name.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use qulint_admin::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AdminConfig::load()?;
//! let connection = connect(&config.database).await?;
//! let registry = config.model_registry(&connection)?;
//!
//! let generator = ScaffoldGenerator::from_name("User", &registry)?;
//! let result = generator.generate().await?;
//! print!("{}", result.form);
//! # Ok(())
//! # }
//! ```
//!
//! # Schema access
//!
//! Columns are read through the richest strategy the connection exposes,
//! first available wins:
//!
//! 1. A per-table schema manager (SQLite)
//! 2. A connection-level schema manager (PostgreSQL)
//! 3. The name-only column listing, where every column reads as `string`
//!
//! See [`schema`] for details.

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod model;
pub mod observability;
pub mod scaffold;
pub mod schema;
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use qulint_admin::prelude::*;
    //! ```

    pub use crate::config::{AdminConfig, DatabaseSettings, ModelSettings, ScaffoldSettings};
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::model::{Model, ModelRegistry, TableModel};
    pub use crate::scaffold::{
        Artifact, FieldKind, FormField, GenerationResult, ScaffoldGenerator, ScaffoldSyntax,
    };
    pub use crate::schema::{
        connect, select_reader, ColumnDescriptor, DataConnection, SchemaBackend, SchemaReader,
        SqlType,
    };
}
