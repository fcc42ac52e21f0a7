//! Catalog data types for foreign-data objects.

use crate::datum::Type;
use crate::options::{DefElem, RelationDescriptor};

/// A foreign server definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignServer {
    /// Server name.
    pub name: String,
    /// Declared options (always empty once validated).
    pub options: Vec<DefElem>,
}

/// A user mapping on a foreign server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMapping {
    /// Local user name.
    pub user: String,
    /// Server the mapping applies to.
    pub server: String,
    /// Declared options (always empty once validated).
    pub options: Vec<DefElem>,
}

/// A column of a foreign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Column type.
    pub ty: Type,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A foreign table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignTable {
    /// Relation id assigned at definition time.
    pub relid: u32,
    /// Local table name.
    pub name: String,
    /// Owning foreign server.
    pub server: String,
    /// Local column definitions.
    pub columns: Vec<ColumnDef>,
    /// Options as declared, in declaration order.
    pub options: Vec<DefElem>,
    /// Remote relation identity extracted from `options`.
    pub descriptor: RelationDescriptor,
}

impl ForeignTable {
    /// Estimated width in bytes of one row of this table.
    pub fn row_width(&self) -> u32 {
        self.columns.iter().map(|c| c.ty.typical_width()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_width() {
        let table = ForeignTable {
            relid: 1,
            name: "t".to_string(),
            server: "s".to_string(),
            columns: vec![
                ColumnDef::new("id", Type::Int4),
                ColumnDef::new("ok", Type::Bool),
                ColumnDef::new("name", Type::Text),
            ],
            options: vec![],
            descriptor: RelationDescriptor::new("public", "t"),
        };
        assert_eq!(table.row_width(), 4 + 1 + 32);
    }
}
