//! Runs the planning callbacks for one foreign relation.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::ForeignCatalog;
use crate::error::{FdwError, PlanError};
use crate::fdw::ForeignDataWrapper;
use crate::planner::{BaseRel, PlanFragment, RestrictInfo, SizeEstimates};

/// Plans a scan of the foreign table `relid` under the given restriction clauses.
///
/// Calls the wrapper's size, path and plan callbacks in order and picks the
/// cheapest path by total cost. The fragment is shared so every execution of
/// the plan reads the same query and qualifiers.
///
/// # Errors
///
/// [`FdwError::Catalog`] if `relid` is not a foreign table,
/// [`PlanError::NoPath`] if the wrapper proposed no path, or whatever the
/// wrapper's plan callback reports.
pub fn plan_foreign_scan<W: ForeignDataWrapper, E: SizeEstimates>(
    catalog: &ForeignCatalog,
    fdw: &W,
    relid: u32,
    restrictions: Vec<RestrictInfo>,
    estimates: &E,
) -> Result<Arc<PlanFragment>, FdwError> {
    let table = catalog.foreign_table(relid)?;

    let mut rel = BaseRel::new(relid, table.row_width());
    rel.baserestrictinfo = restrictions;
    fdw.get_foreign_rel_size(&mut rel, table, estimates);
    fdw.get_foreign_paths(&mut rel, table);

    let best_path = rel
        .cheapest_total_path()
        .ok_or(PlanError::NoPath { relid })?;
    let plan = fdw.get_foreign_plan(&rel, table, best_path, &rel.baserestrictinfo)?;

    debug!(
        relid,
        table = %table.name,
        rows = plan.rows,
        total_cost = plan.total_cost,
        query = %plan.query,
        "foreign scan planned"
    );
    Ok(Arc::new(plan))
}
