//! Native type name resolution

use super::{ColumnDescriptor, NativeColumn, SqlType};
use std::collections::HashMap;

/// Native database types that enhanced backends report as `string`
///
/// These have no dedicated semantic type; mapping them to `string` lets the
/// classifier treat them as text fields.
pub const STRING_TYPE_OVERRIDES: &[&str] = &[
    "enum",
    "geometry",
    "geometrycollection",
    "linestring",
    "polygon",
    "multilinestring",
    "multipoint",
    "multipolygon",
    "point",
];

/// Maps native database type names onto [`SqlType`]
///
/// Registered overrides win over the built-in table. Lookups are
/// case-insensitive and ignore length or precision suffixes, so
/// `VARCHAR(255)` resolves like `varchar`.
#[derive(Debug, Clone, Default)]
pub struct TypePlatform {
    overrides: HashMap<String, SqlType>,
}

impl TypePlatform {
    /// Create a platform with no overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom mapping from a native type name
    pub fn register_type_mapping(&mut self, db_type: &str, sql_type: SqlType) {
        self.overrides.insert(db_type.trim().to_lowercase(), sql_type);
    }

    /// Register the fixed set of geometry and enum overrides
    pub fn register_string_overrides(&mut self) {
        for db_type in STRING_TYPE_OVERRIDES {
            self.register_type_mapping(db_type, SqlType::String);
        }
    }

    /// Resolve a native type name
    #[must_use]
    pub fn resolve(&self, native_type: &str) -> SqlType {
        let lowered = native_type.trim().to_lowercase();

        // MySQL reports booleans as TINYINT(1)
        if lowered == "tinyint(1)" {
            return SqlType::Boolean;
        }

        let base = lowered
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches(" unsigned");

        if let Some(sql_type) = self.overrides.get(base) {
            return sql_type.clone();
        }

        if base.ends_with("[]") {
            return SqlType::Array;
        }

        SqlType::from_native(base)
    }

    /// Convert a raw backend row into a column descriptor
    #[must_use]
    pub fn describe(&self, column: NativeColumn) -> ColumnDescriptor {
        ColumnDescriptor {
            sql_type: self.resolve(&column.native_type),
            name: column.name,
            default: column.default,
        }
    }
}
