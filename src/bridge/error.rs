//! Bridge-specific errors.

use thiserror::Error;

use crate::sql::SyntaxError;

/// Errors reported by a data-access bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A call was made outside a connected session.
    #[error("not connected to a data access session")]
    NotConnected,

    /// The query text could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The query names a relation the facility does not have.
    #[error("relation \"{schema}.{table}\" does not exist")]
    RelationNotFound { schema: String, table: String },

    /// No cursor with this name is open.
    #[error("cursor \"{name}\" does not exist")]
    CursorNotFound { name: String },

    /// The open-cursor limit has been reached.
    #[error("too many open cursors (limit {limit})")]
    TooManyCursors { limit: usize },

    /// The cursor cannot scan backward.
    #[error("cursor can only scan forward")]
    ForwardOnly,
}
