//! Data-access bridge used to run the remote query.
//!
//! The scan executor talks to the data-access facility only through the
//! [`Bridge`] trait: prepare a query, open a named cursor over it, look the
//! cursor up again by name, fetch rows and close it. Every call is made inside
//! a [`ScopedSession`], which connects on creation and finishes on drop so
//! nothing allocated by the bridge outlives the call that produced it.
//!
//! # Components
//!
//! - [`Bridge`]: capability interface implemented by a data-access facility
//! - [`ScopedSession`]: RAII bracket around bridge calls
//! - [`MemoryBridge`]: in-memory facility holding relations and cursors
//! - [`CursorHandle`]: the name a scan keeps between callbacks

mod error;
mod memory;
mod session;

pub use error::BridgeError;
pub use memory::{BridgeStats, MemoryBridge};
pub use session::ScopedSession;

use std::fmt;

use crate::datum::Value;

/// Name of an open cursor.
///
/// A scan holds this value between callbacks instead of a reference into the
/// bridge, and looks the cursor up again on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CursorHandle(String);

impl CursorHandle {
    /// Wraps a cursor name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the cursor name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CursorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for opening a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOptions {
    /// The cursor never modifies data.
    pub read_only: bool,
    /// The cursor survives the end of the enclosing transaction.
    pub hold: bool,
}

impl CursorOptions {
    /// Read-only, non-holdable cursor: private to the opening transaction.
    pub const READ_ONLY: CursorOptions = CursorOptions {
        read_only: true,
        hold: false,
    };
}

/// Rows returned by one fetch.
///
/// Owned by the [`ScopedSession`] that fetched it and dropped when the
/// session finishes; callers copy rows out before then.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TupleTable {
    /// Column names of the result.
    pub columns: Vec<String>,
    /// Fetched rows, each with one value per column.
    pub rows: Vec<Vec<Value>>,
}

impl TupleTable {
    /// Number of rows fetched.
    pub fn processed(&self) -> usize {
        self.rows.len()
    }
}

/// Capability interface of a data-access facility.
///
/// Calls other than [`connect`](Bridge::connect) are only valid between a
/// `connect` and its matching [`finish`](Bridge::finish); use
/// [`ScopedSession`] rather than calling these directly.
pub trait Bridge {
    /// Prepared query.
    type Plan;
    /// Live cursor found by name.
    type Portal;

    /// Enters a session.
    fn connect(&self) -> Result<(), BridgeError>;

    /// Leaves the session entered by the matching `connect`, releasing
    /// everything allocated inside it.
    fn finish(&self);

    /// Parses and plans a query.
    fn prepare(&self, query: &str) -> Result<Self::Plan, BridgeError>;

    /// Opens a new cursor over a prepared query and returns its name.
    fn open_cursor(
        &self,
        plan: &Self::Plan,
        options: CursorOptions,
    ) -> Result<CursorHandle, BridgeError>;

    /// Looks up an open cursor by name. Finds nothing outside a session.
    fn find(&self, handle: &CursorHandle) -> Option<Self::Portal>;

    /// Fetches up to `count` rows from a cursor.
    fn fetch(
        &self,
        portal: &Self::Portal,
        forward: bool,
        count: usize,
    ) -> Result<TupleTable, BridgeError>;

    /// Closes a cursor. Outside a session the call is ignored.
    fn close(&self, portal: Self::Portal);
}
