//! Wrapper options and their validation.
//!
//! A foreign table is identified by exactly two options, `schema_name` and
//! `table_name`. The wrapper itself, foreign servers and user mappings accept
//! no options at all.

use std::fmt;

use crate::error::ConfigError;

/// Option naming the remote schema.
pub const SCHEMA_NAME: &str = "schema_name";
/// Option naming the remote table.
pub const TABLE_NAME: &str = "table_name";

/// Catalog object an option list is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// The foreign data wrapper itself.
    Wrapper,
    /// A foreign server.
    ForeignServer,
    /// A user mapping for a foreign server.
    UserMapping,
    /// A foreign table (external relation).
    ForeignTable,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Wrapper => "foreign-data wrapper",
            ObjectKind::ForeignServer => "foreign server",
            ObjectKind::UserMapping => "user mapping",
            ObjectKind::ForeignTable => "foreign table",
        };
        write!(f, "{}", name)
    }
}

/// One `name = value` option as declared in a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefElem {
    /// Option name.
    pub name: String,
    /// Option value.
    pub value: String,
}

impl DefElem {
    /// Creates a new option.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Validates the options attached to a catalog object.
///
/// Options are checked in declaration order, so the first offending option
/// is the one reported. The count check for foreign tables runs last.
///
/// # Errors
///
/// - [`ConfigError::OptionNotAllowed`] if `kind` is not a foreign table and any
///   option is present
/// - [`ConfigError::UnknownOption`] for a name other than `table_name` or
///   `schema_name`
/// - [`ConfigError::MissingOptions`] if a foreign table does not carry exactly
///   two options
pub fn validate_options(options: &[DefElem], kind: ObjectKind) -> Result<(), ConfigError> {
    for def in options {
        if kind != ObjectKind::ForeignTable {
            return Err(ConfigError::OptionNotAllowed {
                name: def.name.clone(),
            });
        }
        if def.name != TABLE_NAME && def.name != SCHEMA_NAME {
            return Err(ConfigError::UnknownOption {
                name: def.name.clone(),
            });
        }
    }

    if kind == ObjectKind::ForeignTable && options.len() != 2 {
        return Err(ConfigError::MissingOptions);
    }
    Ok(())
}

/// Identity of one external relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationDescriptor {
    /// Remote schema qualifier.
    pub schema_name: String,
    /// Remote table qualifier.
    pub table_name: String,
}

impl RelationDescriptor {
    /// Creates a new descriptor.
    pub fn new(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
        }
    }

    /// Builds a descriptor from a foreign table's options.
    ///
    /// Runs [`validate_options`] first, so a descriptor always has both parts.
    /// Note that `schema_name` given twice passes the count check but leaves
    /// `table_name` unset, which is reported as [`ConfigError::MissingOptions`].
    pub fn from_options(options: &[DefElem]) -> Result<Self, ConfigError> {
        validate_options(options, ObjectKind::ForeignTable)?;

        let mut schema_name = None;
        let mut table_name = None;
        for def in options {
            match def.name.as_str() {
                SCHEMA_NAME => schema_name = Some(def.value.clone()),
                TABLE_NAME => table_name = Some(def.value.clone()),
                _ => {}
            }
        }

        match (schema_name, table_name) {
            (Some(schema_name), Some(table_name)) => Ok(Self {
                schema_name,
                table_name,
            }),
            _ => Err(ConfigError::MissingOptions),
        }
    }
}

impl fmt::Display for RelationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema_name, self.table_name)
    }
}
