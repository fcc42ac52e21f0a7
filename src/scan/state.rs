//! Per-execution scan state and cursor lifecycle.

use tracing::{debug, trace};

use crate::bridge::{Bridge, CursorHandle, CursorOptions, ScopedSession};
use crate::error::ExecutionError;

use super::slot::TupleSlot;

/// State of one execution of a foreign scan.
///
/// Holds the remote query and the name of the cursor running it. While
/// `cursor` is `Some`, the named cursor is open in the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    query: String,
    cursor: Option<CursorHandle>,
}

impl ScanState {
    /// Creates a state for `query` with no cursor open yet.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cursor: None,
        }
    }

    /// The remote query this scan runs.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Name of the open cursor, if any.
    pub fn cursor(&self) -> Option<&CursorHandle> {
        self.cursor.as_ref()
    }

    /// Prepares the query and opens a fresh read-only cursor over it.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::Prepare`] or [`ExecutionError::CursorOpen`], carrying
    /// the query text. The state keeps no cursor on failure.
    pub fn open_new_cursor<B: Bridge>(&mut self, bridge: &B) -> Result<(), ExecutionError> {
        let session = ScopedSession::connect(bridge).map_err(ExecutionError::Connect)?;
        let plan = session
            .prepare(&self.query)
            .map_err(|source| ExecutionError::Prepare {
                query: self.query.clone(),
                source,
            })?;
        let handle = session
            .open_cursor(&plan, CursorOptions::READ_ONLY)
            .map_err(|source| ExecutionError::CursorOpen {
                query: self.query.clone(),
                source,
            })?;

        debug!(cursor = %handle, query = %self.query, "scan cursor opened");
        self.cursor = Some(handle);
        Ok(())
    }

    /// Closes the cursor, if one is open, and forgets its name.
    ///
    /// A cursor that no longer exists in the bridge is simply forgotten.
    pub fn close_old_cursor<B: Bridge>(&mut self, bridge: &B) -> Result<(), ExecutionError> {
        if self.cursor.is_none() {
            return Ok(());
        }
        // The handle is kept if no session can be opened, so End can retry.
        let session = ScopedSession::connect(bridge).map_err(ExecutionError::Connect)?;
        let Some(handle) = self.cursor.take() else {
            return Ok(());
        };
        match session.find(&handle) {
            Some(portal) => {
                session.close(portal);
                debug!(cursor = %handle, "scan cursor closed");
            }
            None => debug!(cursor = %handle, "scan cursor already gone"),
        }
        Ok(())
    }

    /// Fetches the next row into `slot`.
    ///
    /// Returns `Ok(None)` at end of stream: when no cursor is open, when the
    /// cursor has disappeared from the bridge, or when it has no more rows.
    /// The slot is cleared first, so it is empty whenever `None` is returned.
    pub fn iterate<'s, B: Bridge>(
        &mut self,
        bridge: &B,
        slot: &'s mut TupleSlot,
    ) -> Result<Option<&'s TupleSlot>, ExecutionError> {
        slot.clear();
        let Some(handle) = self.cursor.as_ref() else {
            return Ok(None);
        };

        let mut session = ScopedSession::connect(bridge).map_err(ExecutionError::Connect)?;
        let Some(portal) = session.find(handle) else {
            debug!(cursor = %handle, "scan cursor no longer exists");
            self.cursor = None;
            return Ok(None);
        };
        let table = session
            .fetch(&portal, true, 1)
            .map_err(|source| ExecutionError::Fetch {
                cursor: handle.name().to_string(),
                source,
            })?;

        match table.rows.first() {
            Some(row) => {
                // Copy out while the session still owns the fetched rows.
                slot.store_deformed(row);
                trace!(cursor = %handle, "row fetched");
                Ok(Some(slot))
            }
            None => {
                trace!(cursor = %handle, "end of stream");
                Ok(None)
            }
        }
    }

    /// Restarts the scan from the first row with a fresh cursor.
    pub fn rescan<B: Bridge>(&mut self, bridge: &B) -> Result<(), ExecutionError> {
        debug!(query = %self.query, "rescan");
        self.close_old_cursor(bridge)?;
        self.open_new_cursor(bridge)
    }

    /// Ends the scan, closing any open cursor. Calling it again does nothing.
    pub fn end<B: Bridge>(&mut self, bridge: &B) -> Result<(), ExecutionError> {
        self.close_old_cursor(bridge)
    }
}
