//! Scaffold command
//!
//! Generates form, show and grid statements for a model and prints them, or
//! writes them into a screen definition file.
//!
//! # Example
//!
//! ```bash
//! qulint-admin scaffold User
//! qulint-admin scaffold Post --table blog.posts --only form
//! qulint-admin scaffold User --write
//! ```

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::Confirm;
use qulint_admin::config::AdminConfig;
use qulint_admin::scaffold::{Artifact, GenerationResult};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::Path;

use super::{open_generator, spinner};
use crate::templates::ScreenTemplate;

static SUCCESS: Emoji<'_, '_> = Emoji("✓ ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

/// What happened to a screen definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written
    Created,
    /// The file existed with different contents and was replaced
    Overwritten,
    /// The file already had the generated contents
    Unchanged,
    /// Replacing the file was declined
    Skipped,
}

/// Generate the screen definition statements of a model
pub struct ScaffoldCommand {
    model: String,
    table: Option<String>,
    only: Option<Artifact>,
    write: bool,
    force: bool,
}

impl ScaffoldCommand {
    /// Create a new command instance
    pub const fn new(model: String, table: Option<String>) -> Self {
        Self {
            model,
            table,
            only: None,
            write: false,
            force: false,
        }
    }

    /// Limit printed output to one artifact
    #[must_use]
    pub const fn only(mut self, artifact: Option<Artifact>) -> Self {
        self.only = artifact;
        self
    }

    /// Write a screen definition file instead of printing
    #[must_use]
    pub const fn write(mut self, write: bool, force: bool) -> Self {
        self.write = write;
        self.force = force;
        self
    }

    /// Execute the command
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let generator = open_generator(config, &self.model, self.table.as_deref()).await?;

        let progress = spinner("Reading table schema...")?;
        let result = generator.generate().await;
        progress.finish_and_clear();
        let result = result.context("Failed to generate scaffold")?;

        if !self.write {
            print_artifacts(&result, self.only);
            return Ok(());
        }

        let template = ScreenTemplate::new(&self.model, &generator.model().table());
        let path = template.path(&config.scaffold.output_dir);
        let content = template.render(&result)?;

        let outcome = write_screen(&path, &content, self.force, || {
            Confirm::new()
                .with_prompt(format!("Overwrite {}?", path.display()))
                .default(false)
                .interact()
                .context("Failed to read confirmation")
        })?;

        match outcome {
            WriteOutcome::Created | WriteOutcome::Overwritten => println!(
                "{}{} {}",
                SUCCESS,
                style(if outcome == WriteOutcome::Created { "Created" } else { "Updated" })
                    .green()
                    .bold(),
                style(path.display()).cyan()
            ),
            WriteOutcome::Unchanged => println!(
                "{}{} is up to date",
                FILE,
                style(path.display()).cyan()
            ),
            WriteOutcome::Skipped => println!("{}", style("Left existing file untouched").yellow()),
        }

        Ok(())
    }
}

fn print_artifacts(result: &GenerationResult, only: Option<Artifact>) {
    if let Some(artifact) = only {
        print!("{}", result.get(artifact));
        return;
    }

    for artifact in Artifact::ALL {
        println!("{}", style(format!("// {artifact}")).cyan().bold());
        print!("{}", result.get(artifact));
        println!();
    }
}

/// Write `content` to `path`, diffing against an existing file first
///
/// An existing file with different contents is replaced only when `force`
/// is set or `confirm` returns `true`. Parent directories are created.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or `confirm` fails
pub fn write_screen(
    path: &Path,
    content: &str,
    force: bool,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<WriteOutcome> {
    let outcome = if path.exists() {
        let existing = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if existing == content {
            return Ok(WriteOutcome::Unchanged);
        }

        print_diff(path, &existing, content);
        if !force && !confirm()? {
            return Ok(WriteOutcome::Skipped);
        }
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?outcome, "screen definition written");
    Ok(outcome)
}

fn print_diff(path: &Path, existing: &str, content: &str) {
    println!("{FILE}{}", style(path.display()).bold());
    println!();

    let diff = TextDiff::from_lines(existing, content);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
            ChangeTag::Equal => print!(" {change}"),
        }
    }
    println!();
}
