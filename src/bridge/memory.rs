//! In-memory data-access facility.
//!
//! [`MemoryBridge`] keeps relations as row vectors and runs the only query
//! shape the planner produces, a full `SELECT *` over one relation. Cursors
//! are insensitive: opening one snapshots the relation's rows, so later
//! inserts are not visible through it. Non-holdable cursors are dropped by
//! [`MemoryBridge::end_transaction`].
//!
//! All state sits behind one `parking_lot::Mutex`, so the bridge is shared by
//! reference between scans.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::catalog::ColumnDef;
use crate::datum::Value;
use crate::sql::parse_scan_query;

use super::{Bridge, BridgeError, CursorHandle, CursorOptions, TupleTable};

/// Schema used for unqualified relation names.
const DEFAULT_SCHEMA: &str = "public";

/// Counters describing how the bridge has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Sessions entered.
    pub connects: u64,
    /// Sessions finished.
    pub finishes: u64,
    /// Cursors opened.
    pub cursors_opened: u64,
    /// Cursors closed explicitly.
    pub cursors_closed: u64,
    /// Rows returned by fetches.
    pub rows_fetched: u64,
}

/// A stored relation.
#[derive(Debug)]
struct Relation {
    columns: Vec<ColumnDef>,
    rows: Arc<Vec<Vec<Value>>>,
}

/// A prepared scan over one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPlan {
    schema: String,
    table: String,
}

/// A cursor found by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPortal {
    name: String,
}

/// An open cursor.
#[derive(Debug)]
struct PortalState {
    columns: Vec<String>,
    rows: Arc<Vec<Vec<Value>>>,
    /// Number of rows already returned.
    position: usize,
    hold: bool,
}

#[derive(Debug, Default)]
struct Inner {
    relations: HashMap<(String, String), Relation>,
    portals: HashMap<String, PortalState>,
    /// Nesting depth of connected sessions.
    depth: usize,
    next_portal: u64,
    max_open_cursors: Option<usize>,
    stats: BridgeStats,
}

impl Inner {
    fn require_session(&self) -> Result<(), BridgeError> {
        if self.depth == 0 {
            Err(BridgeError::NotConnected)
        } else {
            Ok(())
        }
    }
}

/// In-memory [`Bridge`] implementation.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    inner: Mutex<Inner>,
}

impl MemoryBridge {
    /// Creates an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) a relation with no rows.
    pub fn create_relation(&self, schema: &str, table: &str, columns: Vec<ColumnDef>) {
        let mut inner = self.inner.lock();
        inner.relations.insert(
            (schema.to_string(), table.to_string()),
            Relation {
                columns,
                rows: Arc::new(Vec::new()),
            },
        );
    }

    /// Appends rows to a relation.
    ///
    /// Cursors already open keep seeing the rows they were opened with.
    pub fn insert_rows(
        &self,
        schema: &str,
        table: &str,
        rows: Vec<Vec<Value>>,
    ) -> Result<(), BridgeError> {
        let mut inner = self.inner.lock();
        let relation = inner
            .relations
            .get_mut(&(schema.to_string(), table.to_string()))
            .ok_or_else(|| BridgeError::RelationNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            })?;
        Arc::make_mut(&mut relation.rows).extend(rows);
        Ok(())
    }

    /// Limits how many cursors may be open at once.
    pub fn set_max_open_cursors(&self, limit: Option<usize>) {
        self.inner.lock().max_open_cursors = limit;
    }

    /// Ends the current transaction, dropping every non-holdable cursor.
    pub fn end_transaction(&self) {
        let mut inner = self.inner.lock();
        let before = inner.portals.len();
        inner.portals.retain(|_, p| p.hold);
        debug!(
            dropped = before - inner.portals.len(),
            "transaction ended, non-holdable cursors dropped"
        );
    }

    /// Returns the current session nesting depth.
    pub fn session_depth(&self) -> usize {
        self.inner.lock().depth
    }

    /// Returns the number of open cursors.
    pub fn open_cursor_count(&self) -> usize {
        self.inner.lock().portals.len()
    }

    /// Returns true if a cursor with this name is open.
    pub fn is_open(&self, handle: &CursorHandle) -> bool {
        self.inner.lock().portals.contains_key(handle.name())
    }

    /// Returns usage counters.
    pub fn stats(&self) -> BridgeStats {
        self.inner.lock().stats
    }
}

impl Bridge for MemoryBridge {
    type Plan = MemoryPlan;
    type Portal = MemoryPortal;

    fn connect(&self) -> Result<(), BridgeError> {
        let mut inner = self.inner.lock();
        inner.depth += 1;
        inner.stats.connects += 1;
        Ok(())
    }

    fn finish(&self) {
        let mut inner = self.inner.lock();
        if inner.depth == 0 {
            warn!("finish called without a connected session");
            return;
        }
        inner.depth -= 1;
        inner.stats.finishes += 1;
    }

    fn prepare(&self, query: &str) -> Result<MemoryPlan, BridgeError> {
        let inner = self.inner.lock();
        inner.require_session()?;

        let parsed = parse_scan_query(query)?;
        let schema = parsed.schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        let key = (schema, parsed.table);
        if !inner.relations.contains_key(&key) {
            return Err(BridgeError::RelationNotFound {
                schema: key.0,
                table: key.1,
            });
        }
        Ok(MemoryPlan {
            schema: key.0,
            table: key.1,
        })
    }

    fn open_cursor(
        &self,
        plan: &MemoryPlan,
        options: CursorOptions,
    ) -> Result<CursorHandle, BridgeError> {
        let mut inner = self.inner.lock();
        inner.require_session()?;

        if let Some(limit) = inner.max_open_cursors {
            if inner.portals.len() >= limit {
                return Err(BridgeError::TooManyCursors { limit });
            }
        }

        let relation = inner
            .relations
            .get(&(plan.schema.clone(), plan.table.clone()))
            .ok_or_else(|| BridgeError::RelationNotFound {
                schema: plan.schema.clone(),
                table: plan.table.clone(),
            })?;
        let state = PortalState {
            columns: relation.columns.iter().map(|c| c.name.clone()).collect(),
            rows: Arc::clone(&relation.rows),
            position: 0,
            hold: options.hold,
        };

        inner.next_portal += 1;
        let name = format!("<unnamed portal {}>", inner.next_portal);
        inner.portals.insert(name.clone(), state);
        inner.stats.cursors_opened += 1;
        let relation = format!("{}.{}", plan.schema, plan.table);
        debug!(cursor = %name, %relation, "cursor opened");
        Ok(CursorHandle::new(name))
    }

    fn find(&self, handle: &CursorHandle) -> Option<MemoryPortal> {
        let inner = self.inner.lock();
        if inner.require_session().is_err() {
            return None;
        }
        inner.portals.contains_key(handle.name()).then(|| MemoryPortal {
            name: handle.name().to_string(),
        })
    }

    fn fetch(
        &self,
        portal: &MemoryPortal,
        forward: bool,
        count: usize,
    ) -> Result<TupleTable, BridgeError> {
        let mut inner = self.inner.lock();
        inner.require_session()?;
        if !forward {
            return Err(BridgeError::ForwardOnly);
        }

        let state = inner
            .portals
            .get_mut(&portal.name)
            .ok_or_else(|| BridgeError::CursorNotFound {
                name: portal.name.clone(),
            })?;
        let start = state.position.min(state.rows.len());
        let end = start.saturating_add(count).min(state.rows.len());
        state.position = end;
        let table = TupleTable {
            columns: state.columns.clone(),
            rows: state.rows[start..end].to_vec(),
        };

        inner.stats.rows_fetched += table.rows.len() as u64;
        trace!(cursor = %portal.name, processed = table.processed(), "fetch");
        Ok(table)
    }

    fn close(&self, portal: MemoryPortal) {
        let mut inner = self.inner.lock();
        if inner.require_session().is_err() {
            warn!(cursor = %portal.name, "close outside a session ignored");
            return;
        }
        if inner.portals.remove(&portal.name).is_some() {
            inner.stats.cursors_closed += 1;
            debug!(cursor = %portal.name, "cursor closed");
        }
    }
}
