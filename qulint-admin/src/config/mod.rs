//! Configuration management for qulint-admin
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `QULINT_` prefix, `__` for nesting)
//! 2. `./qulint-admin.toml` (project)
//! 3. `~/.config/qulint-admin/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! Environment variable format: `QULINT_SECTION__FIELD_NAME`
//! - Example: `QULINT_DATABASE__URL=sqlite://./app.db`
//! - Model identifiers keep their case: `QULINT_MODELS__User__TABLE=users`
//!
//! # Example Configuration
//!
//! ```toml
//! # qulint-admin.toml
//! [database]
//! url = "sqlite://./app.db"
//! table_prefix = ""
//! introspection = true
//!
//! [scaffold]
//! output_dir = "src/admin"
//!
//! [scaffold.syntax]
//! grid_column = "grid.column({{quote column}}, {{quote label}});"
//!
//! [models.User]
//! table = "users"
//!
//! [models.Post]
//! table = "blog.posts"
//! created_at = "inserted_at"
//!
//! [models.Entity]
//! abstract = true
//! ```

use crate::error::{Result, ScaffoldError};
use crate::model::{ModelRegistry, TableModel};
use crate::scaffold::ScaffoldSyntax;
use crate::schema::DataConnection;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Project-level configuration file name
pub const LOCAL_CONFIG_FILE: &str = "qulint-admin.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "QULINT_";

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL (`sqlite:` or `postgres:`)
    pub url: Option<String>,

    /// Prefix prepended to every model table
    pub table_prefix: String,

    /// Use the enhanced schema APIs; `false` forces the name-only listing
    pub introspection: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            table_prefix: String::new(),
            introspection: true,
        }
    }
}

/// Scaffold output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSettings {
    /// Directory screen definitions are written to
    pub output_dir: PathBuf,

    /// Line templates for the generated statements
    pub syntax: ScaffoldSyntax,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("src/admin"),
            syntax: ScaffoldSyntax::default(),
        }
    }
}

/// Model declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Table name, optionally `database.table`; defaults to the plural snake case model name
    pub table: Option<String>,

    /// Primary key column
    pub primary_key: String,

    /// Created-at timestamp column
    pub created_at: String,

    /// Updated-at timestamp column
    pub updated_at: String,

    /// Known type that is not a persisted entity
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            table: None,
            primary_key: "id".to_string(),
            created_at: "created_at".to_string(),
            updated_at: "updated_at".to_string(),
            is_abstract: false,
        }
    }
}

/// Complete qulint-admin configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Scaffold output settings
    #[serde(default)]
    pub scaffold: ScaffoldSettings,

    /// Declared models keyed by identifier
    #[serde(default)]
    pub models: BTreeMap<String, ModelSettings>,
}

impl AdminConfig {
    /// Load configuration from the default locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be parsed
    /// - Configuration values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(env_provider());

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The file contains invalid TOML
    /// - Configuration values fail type conversion
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(env_provider())
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/qulint-admin/config.toml`, or the project file when
    /// no user config directory exists.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("qulint-admin").join("config.toml"),
        )
    }

    /// Build a model registry from the `[models]` declarations
    ///
    /// Every entity model shares `connection`.
    ///
    /// # Errors
    ///
    /// Returns an error if a model identifier is empty
    pub fn model_registry(&self, connection: &Arc<dyn DataConnection>) -> Result<ModelRegistry> {
        let mut registry = ModelRegistry::new();

        for (name, settings) in &self.models {
            if name.trim().is_empty() {
                return Err(ScaffoldError::Config(
                    "model identifiers cannot be empty".to_string(),
                ));
            }

            if settings.is_abstract {
                registry.declare_abstract(name);
                continue;
            }

            let mut model = TableModel::for_name(name, Arc::clone(connection))
                .with_key_name(&settings.primary_key)
                .with_timestamps(&settings.created_at, &settings.updated_at);
            if let Some(table) = &settings.table {
                model = model.with_table(table);
            }
            registry.register(name, Arc::new(model));
        }

        Ok(registry)
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .lowercase(false)
        .map(|key| env_key(key.as_str()).into())
}

/// Map an unprefixed variable name to a configuration key path
///
/// Segments are split on `__` and lowercased, except the identifier
/// following `MODELS`.
fn env_key(name: &str) -> String {
    let is_models = name
        .split("__")
        .next()
        .is_some_and(|section| section.eq_ignore_ascii_case("models"));

    name.split("__")
        .enumerate()
        .map(|(index, segment)| {
            if is_models && index == 1 {
                segment.to_string()
            } else {
                segment.to_ascii_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
