//! CLI command implementations

pub mod columns;
pub mod scaffold;

pub use columns::ColumnsCommand;
pub use scaffold::{ScaffoldCommand, WriteOutcome};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use qulint_admin::config::AdminConfig;
use qulint_admin::error::ScaffoldError;
use qulint_admin::model::{Model, TableModel};
use qulint_admin::scaffold::ScaffoldGenerator;
use qulint_admin::schema::connect;
use std::path::Path;
use std::sync::Arc;

/// Load configuration from an explicit file or the default locations
///
/// # Errors
///
/// Returns an error if a configuration source cannot be parsed
pub fn load_config(path: Option<&Path>) -> Result<AdminConfig> {
    match path {
        Some(path) => {
            let path_str = path
                .to_str()
                .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))?;
            AdminConfig::load_from(path_str)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
        None => AdminConfig::load().context("Failed to load configuration"),
    }
}

/// Connect to the configured database and build a generator for `model`
///
/// With `table`, the model does not need a `[models]` declaration; any
/// declared reserved-column names are still honoured.
///
/// # Errors
///
/// Returns an error if:
/// - The database cannot be reached
/// - The model is declared abstract
/// - The model is unknown (without `table`)
/// - The configured line syntax fails to compile
pub async fn open_generator(
    config: &AdminConfig,
    model: &str,
    table: Option<&str>,
) -> Result<ScaffoldGenerator> {
    let settings = config.models.get(model);
    if settings.is_some_and(|settings| settings.is_abstract) {
        return Err(ScaffoldError::InvalidModel(model.to_string()).into());
    }

    let connection = connect(&config.database)
        .await
        .context("Failed to connect to the database")?;

    let generator = if let Some(table) = table {
        let mut handle = TableModel::for_name(model, connection).with_table(table);
        if let Some(settings) = settings {
            handle = handle
                .with_key_name(&settings.primary_key)
                .with_timestamps(&settings.created_at, &settings.updated_at);
        }
        let handle: Arc<dyn Model> = Arc::new(handle);
        ScaffoldGenerator::new(handle)?
    } else {
        let registry = config.model_registry(&connection)?;
        match ScaffoldGenerator::from_name(model, &registry) {
            Ok(generator) => generator,
            Err(err @ ScaffoldError::InvalidModel(_)) => {
                let declared = registry.entity_names().collect::<Vec<_>>().join(", ");
                let hint = if declared.is_empty() {
                    "no entity models are declared under [models]".to_string()
                } else {
                    format!("declared entity models: {declared}")
                };
                return Err(anyhow::Error::new(err)
                    .context(format!("Cannot scaffold `{model}` ({hint})")));
            }
            Err(err) => return Err(err.into()),
        }
    };

    generator
        .with_syntax(&config.scaffold.syntax)
        .context("Invalid [scaffold.syntax] template")
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(message.to_string());
    Ok(spinner)
}
