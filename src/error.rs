//! Error taxonomy for the foreign data wrapper callbacks.
//!
//! Each phase of the protocol has its own error type:
//!
//! - [`ConfigError`]: invalid options at definition time
//! - [`PlanError`]: relation identity missing while building a plan
//! - [`ExecutionError`]: cursor preparation, open or fetch failure
//!
//! End-of-stream is never an error; it is `Ok(None)` from iteration.

use thiserror::Error;

use crate::bridge::BridgeError;
use crate::catalog::CatalogError;

/// Invalid or missing options on a wrapper object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Options were attached to an object that accepts none.
    #[error("option \"{name}\" is not allowed in this context")]
    OptionNotAllowed { name: String },

    /// Option name is not recognized.
    #[error("option \"{name}\" is unknown")]
    UnknownOption { name: String },

    /// A foreign table must carry exactly `table_name` and `schema_name`.
    #[error("both table_name and schema_name options should be set")]
    MissingOptions,
}

/// Planning failed because the relation identity is incomplete.
///
/// Validation at definition time rules this out, so seeing one means the
/// validator was bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Size estimation never attached a planning context to the relation.
    #[error("foreign relation {relid} has no planning context")]
    MissingPlanningContext { relid: u32 },

    /// A required qualifier option is absent.
    #[error("foreign relation {relid} is missing option \"{option}\"")]
    MissingQualifier { relid: u32, option: &'static str },

    /// No access path was proposed for the relation.
    #[error("no access path for foreign relation {relid}")]
    NoPath { relid: u32 },
}

/// The remote query could not be run through a cursor.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Preparing the remote query failed.
    #[error("failed to prepare remote query \"{query}\": {source}")]
    Prepare {
        query: String,
        #[source]
        source: BridgeError,
    },

    /// Opening a cursor over the prepared query failed.
    #[error("failed to open cursor for remote query \"{query}\": {source}")]
    CursorOpen {
        query: String,
        #[source]
        source: BridgeError,
    },

    /// Fetching from an open cursor failed.
    #[error("failed to fetch from cursor \"{cursor}\": {source}")]
    Fetch {
        cursor: String,
        #[source]
        source: BridgeError,
    },

    /// The bridge refused to start a scoped session.
    #[error("failed to connect to data access bridge: {0}")]
    Connect(#[source] BridgeError),

    /// A local qualifier could not be evaluated against a fetched row.
    #[error("cannot evaluate local qualifier: {0}")]
    Qual(String),
}

/// Any error raised through the wrapper's callback surface.
#[derive(Debug, Error)]
pub enum FdwError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
