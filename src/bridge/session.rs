//! RAII bracket around bridge calls.
//!
//! A [`ScopedSession`] connects when created and finishes when dropped, on
//! every path including early returns through `?`. Rows fetched inside the
//! session are owned by the guard and borrowed out of it, so the borrow
//! checker refuses any attempt to keep them past the end of the session.

use super::{Bridge, BridgeError, CursorHandle, CursorOptions, TupleTable};

/// Connected session on a [`Bridge`].
///
/// # Example
///
/// ```
/// # use cursor_fdw::bridge::{MemoryBridge, ScopedSession};
/// let bridge = MemoryBridge::new();
/// {
///     let _session = ScopedSession::connect(&bridge).unwrap();
///     assert_eq!(bridge.session_depth(), 1);
/// }
/// // Session is finished when the guard is dropped
/// assert_eq!(bridge.session_depth(), 0);
/// ```
pub struct ScopedSession<'b, B: Bridge> {
    bridge: &'b B,
    /// Result of the latest fetch, released with the session.
    tuptable: Option<TupleTable>,
}

impl<'b, B: Bridge> ScopedSession<'b, B> {
    /// Enters a session on `bridge`.
    pub fn connect(bridge: &'b B) -> Result<Self, BridgeError> {
        bridge.connect()?;
        Ok(Self {
            bridge,
            tuptable: None,
        })
    }

    /// Prepares a query.
    pub fn prepare(&self, query: &str) -> Result<B::Plan, BridgeError> {
        self.bridge.prepare(query)
    }

    /// Opens a cursor over a prepared query.
    pub fn open_cursor(
        &self,
        plan: &B::Plan,
        options: CursorOptions,
    ) -> Result<CursorHandle, BridgeError> {
        self.bridge.open_cursor(plan, options)
    }

    /// Looks up a cursor by name.
    pub fn find(&self, handle: &CursorHandle) -> Option<B::Portal> {
        self.bridge.find(handle)
    }

    /// Fetches rows from a cursor.
    ///
    /// The returned table replaces any earlier fetch result of this session
    /// and lives only as long as the session.
    pub fn fetch(
        &mut self,
        portal: &B::Portal,
        forward: bool,
        count: usize,
    ) -> Result<&TupleTable, BridgeError> {
        let table = self.bridge.fetch(portal, forward, count)?;
        Ok(self.tuptable.insert(table))
    }

    /// Closes a cursor.
    pub fn close(&self, portal: B::Portal) {
        self.bridge.close(portal);
    }
}

impl<B: Bridge> Drop for ScopedSession<'_, B> {
    fn drop(&mut self) {
        self.tuptable = None;
        self.bridge.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::MemoryBridge;
    use crate::catalog::ColumnDef;
    use crate::datum::{Type, Value};

    fn bridge() -> MemoryBridge {
        let bridge = MemoryBridge::new();
        bridge.create_relation("public", "items", vec![ColumnDef::new("id", Type::Int4)]);
        bridge
            .insert_rows("public", "items", vec![vec![Value::Int32(1)]])
            .unwrap();
        bridge
    }

    #[test]
    fn test_session_finishes_on_drop() {
        let bridge = bridge();
        {
            let _session = ScopedSession::connect(&bridge).unwrap();
            assert_eq!(bridge.session_depth(), 1);
        }
        assert_eq!(bridge.session_depth(), 0);
    }

    #[test]
    fn test_session_finishes_on_error_path() {
        let bridge = bridge();
        let result: Result<(), BridgeError> = (|| {
            let session = ScopedSession::connect(&bridge)?;
            session.prepare("SELECT * FROM public.missing")?;
            Ok(())
        })();
        assert!(matches!(result, Err(BridgeError::RelationNotFound { .. })));
        assert_eq!(bridge.session_depth(), 0);
        assert_eq!(bridge.stats().connects, bridge.stats().finishes);
    }

    #[test]
    fn test_fetch_result_is_owned_by_session() {
        let bridge = bridge();
        let mut session = ScopedSession::connect(&bridge).unwrap();
        let plan = session.prepare("SELECT * FROM public.items").unwrap();
        let handle = session.open_cursor(&plan, CursorOptions::READ_ONLY).unwrap();
        let portal = session.find(&handle).unwrap();

        let copied: Vec<Value> = session.fetch(&portal, true, 1).unwrap().rows[0].clone();
        session.close(portal);
        drop(session);

        assert_eq!(copied, vec![Value::Int32(1)]);
    }

    #[test]
    fn test_calls_outside_session_are_rejected() {
        let bridge = bridge();
        assert_eq!(
            bridge.prepare("SELECT * FROM public.items").unwrap_err(),
            BridgeError::NotConnected
        );
    }
}
