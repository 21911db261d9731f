//! Naming and literal helpers for code generation
//!
//! Naming conventions come from `inflector`; labels and literals follow the
//! rules used by the generated screen definitions.

use inflector::Inflector;

/// Template helpers for scaffold generation
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use qulint_admin::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
    /// assert_eq!(TemplateHelpers::to_snake_case("HTTPRequest"), "http_request");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to table name (`snake_case` plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use qulint_admin::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_table_name("Post"), "posts");
    /// assert_eq!(TemplateHelpers::to_table_name("UserProfile"), "user_profiles");
    /// assert_eq!(TemplateHelpers::to_table_name("Category"), "categories");
    /// ```
    #[must_use]
    pub fn to_table_name(model: &str) -> String {
        Self::to_snake_case(model).to_plural()
    }

    /// Convert string to module name (`snake_case` singular)
    #[must_use]
    pub fn to_module_name(model: &str) -> String {
        Self::to_snake_case(model)
    }

    /// Derive a field label from a column name
    ///
    /// `-` and `_` become spaces and only the first character is
    /// uppercased; the rest of the name keeps its case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qulint_admin::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_label("first_name"), "First name");
    /// assert_eq!(TemplateHelpers::to_label("IPAddress"), "IPAddress");
    /// assert_eq!(TemplateHelpers::to_label("is-active"), "Is active");
    /// ```
    #[must_use]
    pub fn to_label(column: &str) -> String {
        let spaced = column.replace(['-', '_'], " ");
        let mut chars = spaced.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Render a value as a double-quoted literal
    ///
    /// Backslashes and double quotes are escaped.
    ///
    /// ```
    /// # use qulint_admin::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::quote_literal("guest"), r#""guest""#);
    /// assert_eq!(TemplateHelpers::quote_literal(r#"say "hi""#), r#""say \"hi\"""#);
    /// ```
    #[must_use]
    pub fn quote_literal(value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if matches!(c, '"' | '\\') {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    }

    /// Whether a default literal still carries a value once its surrounding
    /// quote characters are stripped
    #[must_use]
    pub fn has_literal_value(literal: &str) -> bool {
        !literal.trim_matches(['\'', '"']).is_empty()
    }
}
