//! Screen definition file template

use anyhow::{Context, Result};
use handlebars::Handlebars;
use qulint_admin::scaffold::{GenerationResult, TemplateHelpers};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Layout of a written screen definition file
pub const SCREEN_TEMPLATE: &str = "\
// Admin screens for {{model}} (table `{{table}}`)\r
// Generated by qulint-admin. Move each section into its screen definition.\r
\r
// form\r
{{form}}\r
// show\r
{{show}}\r
// grid\r
{{grid}}";

/// Renders generated artifacts into a screen definition file
pub struct ScreenTemplate {
    model: String,
    table: String,
    handlebars: Handlebars<'static>,
}

impl ScreenTemplate {
    /// Create a template for a model and its table
    pub fn new(model: &str, table: &str) -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            model: model.to_string(),
            table: table.to_string(),
            handlebars,
        }
    }

    /// Path of the screen definition file inside `output_dir`
    #[must_use]
    pub fn path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.rs", TemplateHelpers::to_module_name(&self.model)))
    }

    /// Render the file contents
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails
    pub fn render(&self, result: &GenerationResult) -> Result<String> {
        let context = json!({
            "model": self.model,
            "table": self.table,
            "form": result.form,
            "show": result.show,
            "grid": result.grid,
        });

        self.handlebars
            .render_template(SCREEN_TEMPLATE, &context)
            .context("Failed to render screen definition template")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> GenerationResult {
        GenerationResult {
            form: "form.text(\"name\", \"Name\");\r\n".to_string(),
            show: "show.field(\"id\", \"Id\");\r\nshow.field(\"name\", \"Name\");\r\n".to_string(),
            grid: "grid.column(\"id\", \"Id\");\r\n".to_string(),
        }
    }

    #[test]
    fn test_path_uses_snake_case_model() {
        let template = ScreenTemplate::new("UserProfile", "user_profiles");
        assert_eq!(
            template.path(Path::new("src/admin")),
            PathBuf::from("src/admin/user_profile.rs")
        );
    }

    #[test]
    fn test_render_sections_in_order() {
        let rendered = ScreenTemplate::new("User", "users").render(&result()).unwrap();

        assert!(rendered.starts_with("// Admin screens for User (table `users`)\r\n"));
        let form = rendered.find("// form\r\n").unwrap();
        let show = rendered.find("// show\r\n").unwrap();
        let grid = rendered.find("// grid\r\n").unwrap();
        assert!(form < show && show < grid);
        assert!(rendered.contains("show.field(\"name\", \"Name\");\r\n"));
        assert!(rendered.ends_with("grid.column(\"id\", \"Id\");\r\n"));
    }

    #[test]
    fn test_render_does_not_escape_quotes() {
        let rendered = ScreenTemplate::new("User", "users").render(&result()).unwrap();
        assert!(!rendered.contains("&quot;"));
    }
}
