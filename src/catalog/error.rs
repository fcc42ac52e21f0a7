//! Catalog-specific errors.

use thiserror::Error;

use crate::error::ConfigError;

/// Errors that can occur while defining or looking up foreign-data objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Server already exists.
    #[error("server \"{name}\" already exists")]
    ServerAlreadyExists { name: String },

    /// Server does not exist.
    #[error("server \"{name}\" does not exist")]
    ServerNotFound { name: String },

    /// A relation with this name already exists.
    #[error("relation \"{name}\" already exists")]
    TableAlreadyExists { name: String },

    /// No foreign table with this relation id.
    #[error("foreign table {relid} does not exist")]
    RelationNotFound { relid: u32 },

    /// Options failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
