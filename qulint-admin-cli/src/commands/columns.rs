//! Column inspection command
//!
//! Shows how each column of a model's table will be scaffolded.

use anyhow::{Context, Result};
use console::style;
use qulint_admin::config::AdminConfig;

use super::{open_generator, spinner};

/// Print the columns of a model with their classification
pub struct ColumnsCommand {
    model: String,
    table: Option<String>,
}

impl ColumnsCommand {
    /// Create a new command instance
    pub const fn new(model: String, table: Option<String>) -> Self {
        Self { model, table }
    }

    /// Execute the command
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let generator = open_generator(config, &self.model, self.table.as_deref()).await?;

        let progress = spinner("Reading table schema...")?;
        let columns = generator.columns().await;
        progress.finish_and_clear();
        let columns = columns.context("Failed to read table columns")?;

        println!(
            "{} {} {}",
            style(&self.model).green().bold(),
            style(format!("({})", generator.model().table())).dim(),
            style(format!("via {}", generator.backend())).cyan()
        );
        println!();

        let width = columns.iter().map(|c| c.name.len()).max().unwrap_or(0).max(6);
        println!(
            "  {:<width$}  {:<10}  {:<12}  {}",
            style("COLUMN").bold(),
            style("TYPE").bold(),
            style("KIND").bold(),
            style("DEFAULT").bold(),
        );

        for column in &columns {
            let field = generator.classify(column);
            let kind = if generator.is_reserved(&column.name) {
                style("(reserved)".to_string()).dim()
            } else {
                style(field.kind.to_string()).yellow()
            };
            println!(
                "  {:<width$}  {:<10}  {:<12}  {}",
                column.name,
                column.sql_type.to_string(),
                kind,
                column.default.as_deref().unwrap_or("-"),
            );
        }

        println!();
        println!(
            "{} columns, {} reserved",
            columns.len(),
            columns.iter().filter(|c| generator.is_reserved(&c.name)).count()
        );

        Ok(())
    }
}
