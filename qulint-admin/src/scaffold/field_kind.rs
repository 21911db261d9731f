//! Field classification for form generation
//!
//! Each column is mapped to a form widget kind from its semantic type. String
//! columns are refined by sniffing the column name against an ordered rule
//! table; the first matching rule wins.
//!
//! # Classification
//!
//! | Column type                          | Kind        | Default literal        |
//! |--------------------------------------|-------------|------------------------|
//! | boolean                              | `switch`    | raw default            |
//! | json, array, object                  | `text`      | raw default            |
//! | string                               | sniffed     | quoted default         |
//! | integer, bigint, smallint, timestamp | `number`    | raw default            |
//! | decimal, float, real                 | `decimal`   | raw default            |
//! | datetime                             | `datetime`  | current date and time  |
//! | date                                 | `date`      | current date           |
//! | time                                 | `time`      | current time           |
//! | text, blob                           | `textarea`  | raw default            |
//! | anything else                        | `text`      | quoted default         |

use super::TemplateHelpers;
use crate::schema::{ColumnDescriptor, SqlType};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Format of synthesized `datetime` defaults
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Format of synthesized `date` defaults
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of synthesized `time` defaults
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Form widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// On/off toggle
    Switch,
    /// Single-line text input
    Text,
    /// IP address input
    Ip,
    /// Email input
    Email,
    /// Password input
    Password,
    /// URL input
    Url,
    /// Phone number input
    PhoneNumber,
    /// Color picker
    Color,
    /// Image upload
    Image,
    /// File upload
    File,
    /// Integer input
    Number,
    /// Decimal input
    Decimal,
    /// Date and time picker
    DateTime,
    /// Date picker
    Date,
    /// Time picker
    Time,
    /// Multi-line text input
    Textarea,
}

impl FieldKind {
    /// Name used in generated statements
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Text => "text",
            Self::Ip => "ip",
            Self::Email => "email",
            Self::Password => "password",
            Self::Url => "url",
            Self::PhoneNumber => "phonenumber",
            Self::Color => "color",
            Self::Image => "image",
            Self::File => "file",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Textarea => "textarea",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NAME_PATTERNS: [(FieldKind, &str); 8] = [
    (FieldKind::Ip, "ip"),
    (FieldKind::Email, "email|mail"),
    (FieldKind::Password, "password|pwd"),
    (FieldKind::Url, "url|link|src|href"),
    (FieldKind::PhoneNumber, "mobile|phone"),
    (FieldKind::Color, "color|rgb"),
    (FieldKind::Image, "image|img|avatar|pic|picture|cover"),
    (FieldKind::File, "file|attachment"),
];

static NAME_RULES: Lazy<Vec<(FieldKind, Regex)>> = Lazy::new(|| {
    NAME_PATTERNS
        .iter()
        .map(|(kind, alternation)| {
            let regex = Regex::new(&format!("(?i)^({alternation})$"))
                .expect("name patterns are valid regular expressions");
            (*kind, regex)
        })
        .collect()
});

fn first_rule_match(candidate: &str) -> Option<FieldKind> {
    NAME_RULES
        .iter()
        .find(|(_, regex)| regex.is_match(candidate))
        .map(|(kind, _)| *kind)
}

/// Sniff a widget kind from a string column's name
///
/// The whole name is tested against the rule table first. When no rule
/// matches, the `_`/`-` separated segments are tested in name order, each
/// against the table in order.
///
/// # Examples
///
/// ```
/// # use qulint_admin::scaffold::{sniff_name, FieldKind};
/// assert_eq!(sniff_name("Email"), Some(FieldKind::Email));
/// assert_eq!(sniff_name("user_email"), Some(FieldKind::Email));
/// assert_eq!(sniff_name("avatar_url"), Some(FieldKind::Image));
/// assert_eq!(sniff_name("title"), None);
/// ```
#[must_use]
pub fn sniff_name(name: &str) -> Option<FieldKind> {
    first_rule_match(name).or_else(|| {
        name.split(['_', '-'])
            .filter(|segment| !segment.is_empty())
            .find_map(first_rule_match)
    })
}

/// Classification of one form column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Column name
    pub column: String,
    /// Widget kind
    pub kind: FieldKind,
    /// Derived label
    pub label: String,
    /// Default literal, present only when it carries a value
    pub default: Option<String>,
}

impl FormField {
    /// Classify a column
    ///
    /// `now` supplies synthesized date and time defaults; an explicit column
    /// default always wins over them.
    #[must_use]
    pub fn classify(column: &ColumnDescriptor, now: NaiveDateTime) -> Self {
        let raw = column.default.as_deref();
        let quoted = || {
            raw.filter(|value| TemplateHelpers::has_literal_value(value))
                .map(TemplateHelpers::quote_literal)
        };
        let temporal = |format: &str| {
            raw.map_or_else(
                || TemplateHelpers::quote_literal(&now.format(format).to_string()),
                TemplateHelpers::quote_literal,
            )
        };

        let (kind, literal) = match &column.sql_type {
            SqlType::Boolean => (FieldKind::Switch, None),
            SqlType::Json | SqlType::Array | SqlType::Object => (FieldKind::Text, None),
            SqlType::String => (
                sniff_name(&column.name).unwrap_or(FieldKind::Text),
                quoted(),
            ),
            SqlType::Integer | SqlType::BigInt | SqlType::SmallInt | SqlType::Timestamp => {
                (FieldKind::Number, None)
            }
            SqlType::Decimal | SqlType::Float | SqlType::Real => (FieldKind::Decimal, None),
            SqlType::DateTime => (FieldKind::DateTime, Some(temporal(DATETIME_FORMAT))),
            SqlType::Date => (FieldKind::Date, Some(temporal(DATE_FORMAT))),
            SqlType::Time => (FieldKind::Time, Some(temporal(TIME_FORMAT))),
            SqlType::Text | SqlType::Blob => (FieldKind::Textarea, None),
            SqlType::Other(_) => (FieldKind::Text, quoted()),
        };

        let default = literal
            .or_else(|| raw.map(str::to_string))
            .filter(|literal| TemplateHelpers::has_literal_value(literal));

        Self {
            column: column.name.clone(),
            kind,
            label: TemplateHelpers::to_label(&column.name),
            default,
        }
    }
}
