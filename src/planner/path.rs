//! Access path proposal for a foreign relation.

use crate::settings::CostModel;

use super::rel::{BaseRel, ForeignPath};

/// Startup cost charged before the first row of a foreign scan.
const STARTUP_COST: f64 = 1.0;

/// Adds the single full-scan path for a foreign relation.
///
/// Without remote statistics or pushdown there is nothing to tell alternative
/// paths apart, so exactly one unordered path is proposed. It carries no
/// join clauses, but inherits any lateral references of the target list.
pub fn propose_paths(rel: &mut BaseRel, cost: &CostModel) {
    let total_cost =
        cost.seq_page_cost * f64::from(rel.pages) + cost.cpu_tuple_cost * rel.tuples;

    let path = ForeignPath {
        rows: rel.rows,
        startup_cost: STARTUP_COST,
        total_cost,
        pathkeys: Vec::new(),
        required_outer: rel.lateral_relids.clone(),
    };
    rel.add_path(path);
}
