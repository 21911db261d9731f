//! Table schema model and schema-reading strategies
//!
//! Column metadata flows through three layers:
//!
//! 1. A backend ([`SchemaManager`] or the native column listing of a
//!    [`DataConnection`]) reports raw [`NativeColumn`] rows.
//! 2. A [`TypePlatform`] maps each native type name onto the closed
//!    [`SqlType`] enumeration.
//! 3. A [`SchemaReader`] hands the resulting [`ColumnDescriptor`] list to the
//!    scaffold generator, preserving the backend's column order.

pub mod connection;
pub mod platform;
pub mod postgres;
pub mod reader;
pub mod sqlite;

pub use connection::{
    connect, DataConnection, LegacySchemaApi, ModernSchemaApi, NameOnlyConnection, SchemaManager,
};
pub use platform::TypePlatform;
pub use postgres::PgConnection;
pub use reader::{
    select_reader, LegacySchemaReader, ModernSchemaReader, NativeSchemaReader, SchemaBackend,
    SchemaReader,
};
pub use sqlite::SqliteConnection;

use std::fmt;

/// Semantic column type understood by the field classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// Short character data (VARCHAR, CHAR, ...)
    String,
    /// Unbounded text
    Text,
    /// Large binary data
    Blob,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// 16-bit integer
    SmallInt,
    /// Timestamp stored as an integer
    Timestamp,
    /// Boolean
    Boolean,
    /// Fixed-point number
    Decimal,
    /// Double precision float
    Float,
    /// Single precision float
    Real,
    /// Date and time
    DateTime,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// JSON document
    Json,
    /// Array value
    Array,
    /// Serialized object
    Object,
    /// Any type the platform does not recognise (normalised native name)
    Other(String),
}

impl SqlType {
    /// Map a normalised native type name onto a semantic type
    ///
    /// Unrecognised names never fail; they become [`SqlType::Other`].
    #[must_use]
    pub fn from_native(name: &str) -> Self {
        match name {
            "varchar" | "char" | "character varying" | "character" | "nvarchar" | "nchar"
            | "string" | "bpchar" | "citext" => Self::String,
            "text" | "tinytext" | "mediumtext" | "longtext" | "clob" => Self::Text,
            "blob" | "tinyblob" | "mediumblob" | "longblob" | "bytea" => Self::Blob,
            "int" | "integer" | "int4" | "mediumint" | "serial" => Self::Integer,
            "bigint" | "int8" | "bigserial" => Self::BigInt,
            "smallint" | "int2" | "tinyint" | "smallserial" => Self::SmallInt,
            "bool" | "boolean" => Self::Boolean,
            "decimal" | "numeric" | "money" => Self::Decimal,
            "float" | "double" | "double precision" | "float8" => Self::Float,
            "real" | "float4" => Self::Real,
            "datetime" | "timestamp" | "timestamp without time zone"
            | "timestamp with time zone" | "timestamptz" => Self::DateTime,
            "date" => Self::Date,
            "time" | "time without time zone" | "time with time zone" | "timetz" => Self::Time,
            "json" | "jsonb" => Self::Json,
            "array" | "simple_array" => Self::Array,
            "object" => Self::Object,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Blob => "blob",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::SmallInt => "smallint",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Real => "real",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Json => "json",
            Self::Array => "array",
            Self::Object => "object",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// One column of a table, as seen by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name (unique within its table)
    pub name: String,
    /// Semantic type
    pub sql_type: SqlType,
    /// Default value literal, without SQL quoting
    pub default: Option<String>,
}

impl ColumnDescriptor {
    /// Create a column descriptor
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            default: None,
        }
    }

    /// Set the column's default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Descriptor for the name-only native path: type `string`, no default
    pub fn name_only(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::String)
    }
}

/// Raw column row as reported by a schema backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeColumn {
    /// Column name
    pub name: String,
    /// Native type name as declared in the database
    pub native_type: String,
    /// Normalised default value
    pub default: Option<String>,
}

impl NativeColumn {
    /// Create a native column row
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            default: None,
        }
    }

    /// Set the column's default value
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A table name split into its optional database qualifier and table part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTable {
    /// Database (or schema) qualifier
    pub database: Option<String>,
    /// Table name
    pub table: String,
}

impl QualifiedTable {
    /// Split `database.table` into its parts
    ///
    /// Only a dot after the first character qualifies the name; a leading
    /// dot leaves the name untouched. Segments after the second are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use qulint_admin::schema::QualifiedTable;
    /// let qualified = QualifiedTable::parse("mydb.users");
    /// assert_eq!(qualified.database.as_deref(), Some("mydb"));
    /// assert_eq!(qualified.table, "users");
    ///
    /// let plain = QualifiedTable::parse("users");
    /// assert_eq!(plain.database, None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.find('.') {
            Some(idx) if idx > 0 => {
                let mut parts = name.split('.');
                let database = parts.next().unwrap_or_default().to_string();
                let table = parts.next().unwrap_or_default().to_string();
                Self {
                    database: Some(database),
                    table,
                }
            }
            _ => Self {
                database: None,
                table: name.to_string(),
            },
        }
    }
}

impl fmt::Display for QualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.database {
            Some(database) => write!(f, "{database}.{}", self.table),
            None => f.write_str(&self.table),
        }
    }
}

/// Normalise a default expression reported by a database
///
/// Removes SQL string quoting and `::type` casts, and drops `NULL` and
/// sequence defaults, which carry no literal value.
pub(crate) fn normalize_default(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("nextval(") {
        return None;
    }

    if let Some(quoted) = raw.strip_prefix('\'') {
        let mut value = String::new();
        let mut chars = quoted.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                } else {
                    break;
                }
            }
            value.push(c);
        }
        return Some(value);
    }

    let value = raw.split("::").next().unwrap_or_default().trim();
    if value.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_native_families() {
        assert_eq!(SqlType::from_native("varchar"), SqlType::String);
        assert_eq!(SqlType::from_native("boolean"), SqlType::Boolean);
        assert_eq!(SqlType::from_native("int8"), SqlType::BigInt);
        assert_eq!(SqlType::from_native("numeric"), SqlType::Decimal);
        assert_eq!(
            SqlType::from_native("timestamp without time zone"),
            SqlType::DateTime
        );
        assert_eq!(SqlType::from_native("longtext"), SqlType::Text);
        assert_eq!(SqlType::from_native("bytea"), SqlType::Blob);
    }

    #[test]
    fn test_from_native_unknown() {
        assert_eq!(
            SqlType::from_native("geometry"),
            SqlType::Other("geometry".to_string())
        );
    }

    #[test]
    fn test_qualified_table_split() {
        let qualified = QualifiedTable::parse("mydb.users");
        assert_eq!(qualified.database.as_deref(), Some("mydb"));
        assert_eq!(qualified.table, "users");
        assert_eq!(qualified.to_string(), "mydb.users");
    }

    #[test]
    fn test_qualified_table_leading_dot() {
        let table = QualifiedTable::parse(".users");
        assert_eq!(table.database, None);
        assert_eq!(table.table, ".users");
    }

    #[test]
    fn test_qualified_table_extra_segments() {
        let table = QualifiedTable::parse("a.b.c");
        assert_eq!(table.database.as_deref(), Some("a"));
        assert_eq!(table.table, "b");
    }

    #[test]
    fn test_name_only_descriptor() {
        let column = ColumnDescriptor::name_only("price");
        assert_eq!(column.sql_type, SqlType::String);
        assert_eq!(column.default, None);
    }

    #[test]
    fn test_normalize_default() {
        assert_eq!(normalize_default("'guest'").as_deref(), Some("guest"));
        assert_eq!(normalize_default("'it''s'").as_deref(), Some("it's"));
        assert_eq!(
            normalize_default("'draft'::character varying").as_deref(),
            Some("draft")
        );
        assert_eq!(normalize_default("0").as_deref(), Some("0"));
        assert_eq!(normalize_default("CURRENT_TIMESTAMP").as_deref(), Some("CURRENT_TIMESTAMP"));
        assert_eq!(normalize_default("NULL::character varying"), None);
        assert_eq!(normalize_default("nextval('users_id_seq'::regclass)"), None);
        assert_eq!(normalize_default("''").as_deref(), Some(""));
    }
}
