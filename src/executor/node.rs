//! Foreign scan executor node.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::datum::Value;
use crate::error::FdwError;
use crate::fdw::ForeignDataWrapper;
use crate::planner::PlanFragment;
use crate::scan::{ExecFlags, TupleSlot};

/// Executor node that pulls rows from a foreign data wrapper.
///
/// Rows come back one at a time from [`next()`](Self::next) and are re-checked
/// against the plan's local qualifiers, since none of them reach the remote
/// query. Dropping the node without calling [`end()`](Self::end) still ends
/// the scan.
pub struct ForeignScanNode<'w, W: ForeignDataWrapper> {
    fdw: &'w W,
    plan: Arc<PlanFragment>,
    /// `None` in explain-only mode and after the scan has ended.
    state: Option<W::ScanState>,
    slot: TupleSlot,
}

impl<'w, W: ForeignDataWrapper> ForeignScanNode<'w, W> {
    /// Starts a scan of `plan` producing rows of `natts` attributes.
    pub fn begin(
        fdw: &'w W,
        plan: Arc<PlanFragment>,
        flags: ExecFlags,
        natts: usize,
    ) -> Result<Self, FdwError> {
        let state = fdw.begin_foreign_scan(&plan, flags)?;
        debug!(relid = plan.scan_relid, %flags, started = state.is_some(), "foreign scan begun");
        Ok(Self {
            fdw,
            plan,
            state,
            slot: TupleSlot::new(natts),
        })
    }

    /// The plan this node executes.
    pub fn plan(&self) -> &PlanFragment {
        &self.plan
    }

    /// Returns true until the scan has ended.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the next row passing every local qualifier, or `None` if exhausted.
    ///
    /// This method follows the Volcano iterator model naming convention,
    /// not `std::iter::Iterator`, because it returns `Result<Option<_>>`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Vec<Value>>, FdwError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(None);
        };
        loop {
            let Some(slot) = self.fdw.iterate_foreign_scan(state, &mut self.slot)? else {
                return Ok(None);
            };
            let mut passed = true;
            for qual in &self.plan.local_quals {
                // NULL and false both reject the row
                if !qual.is_satisfied(slot.values())? {
                    passed = false;
                    break;
                }
            }
            if passed {
                return Ok(Some(slot.to_row()));
            }
        }
    }

    /// Restarts the scan from the first row. Does nothing once ended.
    pub fn rescan(&mut self) -> Result<(), FdwError> {
        match self.state.as_mut() {
            Some(state) => self.fdw.rescan_foreign_scan(state),
            None => Ok(()),
        }
    }

    /// Ends the scan. Calling it again does nothing.
    pub fn end(&mut self) -> Result<(), FdwError> {
        match self.state.take() {
            Some(mut state) => self.fdw.end_foreign_scan(&mut state),
            None => Ok(()),
        }
    }
}

impl<W: ForeignDataWrapper> Drop for ForeignScanNode<'_, W> {
    fn drop(&mut self) {
        if let Some(mut state) = self.state.take() {
            warn!(relid = self.plan.scan_relid, "foreign scan dropped without end, closing cursor");
            if let Err(e) = self.fdw.end_foreign_scan(&mut state) {
                warn!(relid = self.plan.scan_relid, error = %e, "failed to end foreign scan");
            }
        }
    }
}
