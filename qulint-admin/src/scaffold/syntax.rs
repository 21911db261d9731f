//! Surface syntax of generated statements
//!
//! Every generated line is rendered from a Handlebars template. Templates see
//! `kind`, `column`, `label` and, for form fields with a default chain,
//! `default`. The `quote` helper renders a double-quoted literal.

use super::{FormField, TemplateHelpers};
use crate::error::Result;
use handlebars::{handlebars_helper, Handlebars};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Default form field statement
pub const DEFAULT_FORM_FIELD: &str =
    "form.{{kind}}({{quote column}}, {{quote label}}){{#if default}}.default({{default}}){{/if}};";
/// Default show field statement
pub const DEFAULT_SHOW_FIELD: &str = "show.field({{quote column}}, {{quote label}});";
/// Default grid column statement
pub const DEFAULT_GRID_COLUMN: &str = "grid.column({{quote column}}, {{quote label}});";

const FORM_FIELD: &str = "form_field";
const SHOW_FIELD: &str = "show_field";
const GRID_COLUMN: &str = "grid_column";

/// Line templates for the three artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSyntax {
    /// Form field statement
    pub form_field: String,
    /// Show field statement
    pub show_field: String,
    /// Grid column statement
    pub grid_column: String,
}

impl Default for ScaffoldSyntax {
    fn default() -> Self {
        Self {
            form_field: DEFAULT_FORM_FIELD.to_string(),
            show_field: DEFAULT_SHOW_FIELD.to_string(),
            grid_column: DEFAULT_GRID_COLUMN.to_string(),
        }
    }
}

handlebars_helper!(quote: |value: str| TemplateHelpers::quote_literal(value));

/// Compiled line templates
#[derive(Debug, Clone)]
pub struct LineRenderer {
    handlebars: Handlebars<'static>,
}

impl LineRenderer {
    /// Compile a syntax
    ///
    /// # Errors
    ///
    /// Returns an error if any line template fails to parse
    pub fn new(syntax: &ScaffoldSyntax) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generated code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("quote", Box::new(quote));

        handlebars.register_template_string(FORM_FIELD, &syntax.form_field)?;
        handlebars.register_template_string(SHOW_FIELD, &syntax.show_field)?;
        handlebars.register_template_string(GRID_COLUMN, &syntax.grid_column)?;

        Ok(Self { handlebars })
    }

    /// Render a classified form field
    ///
    /// # Errors
    ///
    /// Returns an error if the template references a failing helper
    pub fn form_field(&self, field: &FormField) -> Result<String> {
        let context = json!({
            "kind": field.kind.as_str(),
            "column": field.column,
            "label": field.label,
            "default": field.default,
        });
        Ok(self.handlebars.render(FORM_FIELD, &context)?)
    }

    /// Render a show field
    ///
    /// # Errors
    ///
    /// Returns an error if the template references a failing helper
    pub fn show_field(&self, column: &str, label: &str) -> Result<String> {
        self.labelled(SHOW_FIELD, column, label)
    }

    /// Render a grid column
    ///
    /// # Errors
    ///
    /// Returns an error if the template references a failing helper
    pub fn grid_column(&self, column: &str, label: &str) -> Result<String> {
        self.labelled(GRID_COLUMN, column, label)
    }

    fn labelled(&self, template: &str, column: &str, label: &str) -> Result<String> {
        let context = json!({ "column": column, "label": label });
        Ok(self.handlebars.render(template, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use crate::scaffold::FieldKind;

    fn renderer() -> LineRenderer {
        LineRenderer::new(&ScaffoldSyntax::default()).unwrap()
    }

    fn field(kind: FieldKind, column: &str, default: Option<&str>) -> FormField {
        FormField {
            column: column.to_string(),
            kind,
            label: TemplateHelpers::to_label(column),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_default_form_line() {
        let renderer = renderer();

        let line = renderer
            .form_field(&field(FieldKind::Email, "user_email", None))
            .unwrap();
        assert_eq!(line, r#"form.email("user_email", "User email");"#);

        let line = renderer
            .form_field(&field(FieldKind::Text, "name", Some(r#""guest""#)))
            .unwrap();
        assert_eq!(line, r#"form.text("name", "Name").default("guest");"#);
    }

    #[test]
    fn test_default_show_and_grid_lines() {
        let renderer = renderer();
        assert_eq!(
            renderer.show_field("first_name", "First name").unwrap(),
            r#"show.field("first_name", "First name");"#
        );
        assert_eq!(
            renderer.grid_column("id", "Id").unwrap(),
            r#"grid.column("id", "Id");"#
        );
    }

    #[test]
    fn test_custom_syntax() {
        let syntax = ScaffoldSyntax {
            form_field: "$form->{{kind}}('{{column}}', __('{{label}}')){{#if default}}->default({{default}}){{/if}}".to_string(),
            ..ScaffoldSyntax::default()
        };
        let renderer = LineRenderer::new(&syntax).unwrap();
        let line = renderer
            .form_field(&field(FieldKind::Number, "views", Some("0")))
            .unwrap();
        assert_eq!(line, "$form->number('views', __('Views'))->default(0)");
    }

    #[test]
    fn test_labels_are_not_html_escaped() {
        let renderer = renderer();
        let line = renderer.show_field("a&b", "A&b").unwrap();
        assert_eq!(line, r#"show.field("a&b", "A&b");"#);
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let syntax = ScaffoldSyntax {
            grid_column: "{{#if column}}unclosed".to_string(),
            ..ScaffoldSyntax::default()
        };
        assert!(matches!(
            LineRenderer::new(&syntax),
            Err(ScaffoldError::Template(_))
        ));
    }
}
