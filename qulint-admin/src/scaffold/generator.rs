//! Scaffold generator
//!
//! Reads a model's columns through the schema reader chosen for its
//! connection and renders the form, show and grid artifacts. Each artifact is
//! a sequence of statements, one per line, each terminated by `\r\n`.

use super::{FormField, LineRenderer, ScaffoldSyntax, TemplateHelpers};
use crate::error::Result;
use crate::model::{Model, ModelRegistry, SOFT_DELETE_COLUMN};
use crate::schema::{select_reader, ColumnDescriptor, SchemaBackend, SchemaReader};
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// Line terminator of every generated statement
pub const LINE_ENDING: &str = "\r\n";

/// One of the three generated artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Form definition
    Form,
    /// Detail definition
    Show,
    /// Listing definition
    Grid,
}

impl Artifact {
    /// All artifacts in generation order
    pub const ALL: [Self; 3] = [Self::Form, Self::Show, Self::Grid];
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Form => "form",
            Self::Show => "show",
            Self::Grid => "grid",
        })
    }
}

/// The three artifacts generated from a single schema read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Form definition
    pub form: String,
    /// Detail definition
    pub show: String,
    /// Listing definition
    pub grid: String,
}

impl GenerationResult {
    /// Text of one artifact
    #[must_use]
    pub fn get(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::Form => &self.form,
            Artifact::Show => &self.show,
            Artifact::Grid => &self.grid,
        }
    }
}

/// Generates screen definition statements for a model
pub struct ScaffoldGenerator {
    model: Arc<dyn Model>,
    reader: Box<dyn SchemaReader>,
    renderer: LineRenderer,
    generated_at: NaiveDateTime,
}

impl ScaffoldGenerator {
    /// Create a generator for a model handle
    ///
    /// The schema reader is selected from the model's connection, and the
    /// clock used for date and time defaults is captured here.
    ///
    /// # Errors
    ///
    /// Returns an error if the default line templates fail to compile
    pub fn new(model: Arc<dyn Model>) -> Result<Self> {
        let reader = select_reader(model.connection());
        let renderer = LineRenderer::new(&ScaffoldSyntax::default())?;

        Ok(Self {
            model,
            reader,
            renderer,
            generated_at: chrono::Local::now().naive_local(),
        })
    }

    /// Create a generator for a model identifier
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidModel`] if the identifier is unknown or
    /// does not name a persisted entity
    ///
    /// [`ScaffoldError::InvalidModel`]: crate::error::ScaffoldError::InvalidModel
    pub fn from_name(name: &str, registry: &ModelRegistry) -> Result<Self> {
        Self::new(registry.resolve(name)?)
    }

    /// Use a custom statement syntax
    ///
    /// # Errors
    ///
    /// Returns an error if a line template fails to compile
    pub fn with_syntax(mut self, syntax: &ScaffoldSyntax) -> Result<Self> {
        self.renderer = LineRenderer::new(syntax)?;
        Ok(self)
    }

    /// Replace the selected schema reader
    #[must_use]
    pub fn with_reader(mut self, reader: Box<dyn SchemaReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Fix the clock used for date and time defaults
    #[must_use]
    pub const fn at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Model being scaffolded
    #[must_use]
    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Schema strategy in use
    #[must_use]
    pub fn backend(&self) -> SchemaBackend {
        self.reader.backend()
    }

    /// Columns the form artifact never includes
    #[must_use]
    pub fn reserved_columns(&self) -> [&str; 4] {
        [
            self.model.key_name(),
            self.model.created_at_column(),
            self.model.updated_at_column(),
            SOFT_DELETE_COLUMN,
        ]
    }

    /// Whether `column` is excluded from the form artifact
    #[must_use]
    pub fn is_reserved(&self, column: &str) -> bool {
        self.reserved_columns().contains(&column)
    }

    /// Read the model's columns in schema order
    ///
    /// # Errors
    ///
    /// Returns the error raised by the schema backend
    pub async fn columns(&self) -> Result<Vec<ColumnDescriptor>> {
        let table = self.model.table();
        let columns = self.reader.read_columns(&table).await?;
        tracing::debug!(
            table = %table,
            backend = %self.backend(),
            columns = columns.len(),
            "columns read"
        );
        Ok(columns)
    }

    /// Classify a column for the form artifact
    #[must_use]
    pub fn classify(&self, column: &ColumnDescriptor) -> FormField {
        FormField::classify(column, self.generated_at)
    }

    /// Generate the form artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or a line fails to render
    pub async fn generate_form(&self) -> Result<String> {
        let columns = self.columns().await?;
        self.render_form(&columns)
    }

    /// Generate the show artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or a line fails to render
    pub async fn generate_show(&self) -> Result<String> {
        let columns = self.columns().await?;
        self.render_show(&columns)
    }

    /// Generate the grid artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or a line fails to render
    pub async fn generate_grid(&self) -> Result<String> {
        let columns = self.columns().await?;
        self.render_grid(&columns)
    }

    /// Generate all three artifacts from one schema read
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or a line fails to render
    pub async fn generate(&self) -> Result<GenerationResult> {
        let columns = self.columns().await?;
        let result = GenerationResult {
            form: self.render_form(&columns)?,
            show: self.render_show(&columns)?,
            grid: self.render_grid(&columns)?,
        };

        tracing::info!(
            table = %self.model.table(),
            columns = columns.len(),
            "scaffold generated"
        );
        Ok(result)
    }

    /// Render the form artifact from already-read columns
    ///
    /// # Errors
    ///
    /// Returns an error if a line fails to render
    pub fn render_form(&self, columns: &[ColumnDescriptor]) -> Result<String> {
        let mut output = String::new();
        for column in columns.iter().filter(|c| !self.is_reserved(&c.name)) {
            output.push_str(&self.renderer.form_field(&self.classify(column))?);
            output.push_str(LINE_ENDING);
        }
        Ok(output)
    }

    /// Render the show artifact from already-read columns
    ///
    /// # Errors
    ///
    /// Returns an error if a line fails to render
    pub fn render_show(&self, columns: &[ColumnDescriptor]) -> Result<String> {
        let mut output = String::new();
        for column in columns {
            let label = TemplateHelpers::to_label(&column.name);
            output.push_str(&self.renderer.show_field(&column.name, &label)?);
            output.push_str(LINE_ENDING);
        }
        Ok(output)
    }

    /// Render the grid artifact from already-read columns
    ///
    /// # Errors
    ///
    /// Returns an error if a line fails to render
    pub fn render_grid(&self, columns: &[ColumnDescriptor]) -> Result<String> {
        let mut output = String::new();
        for column in columns {
            let label = TemplateHelpers::to_label(&column.name);
            output.push_str(&self.renderer.grid_column(&column.name, &label)?);
            output.push_str(LINE_ENDING);
        }
        Ok(output)
    }
}

impl fmt::Debug for ScaffoldGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaffoldGenerator")
            .field("table", &self.model.table())
            .field("backend", &self.backend())
            .field("generated_at", &self.generated_at)
            .finish_non_exhaustive()
    }
}
