//! Foreign data wrapper callback surface.
//!
//! [`ForeignDataWrapper`] is the set of callbacks the host engine invokes to
//! plan and run a scan of a foreign table. [`CursorFdw`] implements it by
//! reading the whole remote relation through a cursor on a [`Bridge`].

use crate::bridge::Bridge;
use crate::catalog::ForeignTable;
use crate::error::FdwError;
use crate::executor::ExplainOutput;
use crate::options::{DefElem, ObjectKind, validate_options};
use crate::planner::{
    BaseRel, ForeignPath, PlanFragment, RestrictInfo, SizeEstimates, build_plan, estimate_rel_size,
    propose_paths,
};
use crate::scan::{ExecFlags, ScanState, TupleSlot};
use crate::settings::Settings;

/// Callbacks a foreign data wrapper provides to the host engine.
///
/// Planning callbacks run once per query in order: relation size, paths, plan.
/// Execution callbacks run per execution of the resulting plan.
pub trait ForeignDataWrapper {
    /// Per-execution state returned by `begin_foreign_scan`.
    type ScanState;

    /// Validates options attached to a wrapper object.
    fn validate_options(&self, options: &[DefElem], kind: ObjectKind) -> Result<(), FdwError>;

    /// Estimates the relation's size and attaches private planning state.
    fn get_foreign_rel_size<E: SizeEstimates>(
        &self,
        rel: &mut BaseRel,
        table: &ForeignTable,
        estimates: &E,
    );

    /// Adds candidate access paths to the relation.
    fn get_foreign_paths(&self, rel: &mut BaseRel, table: &ForeignTable);

    /// Builds the plan for the chosen path.
    fn get_foreign_plan(
        &self,
        rel: &BaseRel,
        table: &ForeignTable,
        best_path: &ForeignPath,
        scan_clauses: &[RestrictInfo],
    ) -> Result<PlanFragment, FdwError>;

    /// Starts an execution. Returns `None` when nothing will be scanned.
    fn begin_foreign_scan(
        &self,
        plan: &PlanFragment,
        flags: ExecFlags,
    ) -> Result<Option<Self::ScanState>, FdwError>;

    /// Fetches the next row into `slot`, or returns `None` at end of stream.
    fn iterate_foreign_scan<'s>(
        &self,
        state: &mut Self::ScanState,
        slot: &'s mut TupleSlot,
    ) -> Result<Option<&'s TupleSlot>, FdwError>;

    /// Restarts the scan from the beginning.
    fn rescan_foreign_scan(&self, state: &mut Self::ScanState) -> Result<(), FdwError>;

    /// Ends the scan and releases its resources.
    fn end_foreign_scan(&self, state: &mut Self::ScanState) -> Result<(), FdwError>;

    /// Adds wrapper-specific details to EXPLAIN output.
    fn explain_foreign_scan(&self, plan: &PlanFragment, out: &mut ExplainOutput);
}

/// Wrapper that scans a remote relation through bridge cursors.
pub struct CursorFdw<'b, B: Bridge> {
    bridge: &'b B,
    settings: Settings,
}

impl<'b, B: Bridge> CursorFdw<'b, B> {
    /// Creates a wrapper over `bridge`.
    pub fn new(bridge: &'b B, settings: Settings) -> Self {
        Self { bridge, settings }
    }
}

impl<B: Bridge> ForeignDataWrapper for CursorFdw<'_, B> {
    type ScanState = ScanState;

    fn validate_options(&self, options: &[DefElem], kind: ObjectKind) -> Result<(), FdwError> {
        validate_options(options, kind)?;
        Ok(())
    }

    fn get_foreign_rel_size<E: SizeEstimates>(
        &self,
        rel: &mut BaseRel,
        table: &ForeignTable,
        estimates: &E,
    ) {
        estimate_rel_size(rel, &table.options, &self.settings, estimates);
    }

    fn get_foreign_paths(&self, rel: &mut BaseRel, _table: &ForeignTable) {
        propose_paths(rel, &self.settings.cost);
    }

    fn get_foreign_plan(
        &self,
        rel: &BaseRel,
        _table: &ForeignTable,
        best_path: &ForeignPath,
        scan_clauses: &[RestrictInfo],
    ) -> Result<PlanFragment, FdwError> {
        Ok(build_plan(rel, best_path, scan_clauses)?)
    }

    fn begin_foreign_scan(
        &self,
        plan: &PlanFragment,
        flags: ExecFlags,
    ) -> Result<Option<ScanState>, FdwError> {
        if flags.contains(ExecFlags::EXPLAIN_ONLY) {
            return Ok(None);
        }
        let mut state = ScanState::new(plan.query.clone());
        state.open_new_cursor(self.bridge)?;
        Ok(Some(state))
    }

    fn iterate_foreign_scan<'s>(
        &self,
        state: &mut ScanState,
        slot: &'s mut TupleSlot,
    ) -> Result<Option<&'s TupleSlot>, FdwError> {
        Ok(state.iterate(self.bridge, slot)?)
    }

    fn rescan_foreign_scan(&self, state: &mut ScanState) -> Result<(), FdwError> {
        Ok(state.rescan(self.bridge)?)
    }

    fn end_foreign_scan(&self, state: &mut ScanState) -> Result<(), FdwError> {
        Ok(state.end(self.bridge)?)
    }

    fn explain_foreign_scan(&self, plan: &PlanFragment, out: &mut ExplainOutput) {
        out.property_text("Remote Query", &plan.query);
    }
}
