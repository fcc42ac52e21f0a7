//! Planner-side view of one foreign relation.

use std::collections::BTreeSet;

use crate::expr::Expr;

/// A restriction clause with the planner's wrapper metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictInfo {
    /// The clause itself.
    pub clause: Expr,
    /// True for clauses that reference no column of any relation and are
    /// evaluated once as a gating condition instead of per row.
    pub pseudoconstant: bool,
    /// Estimated fraction of rows passing the clause.
    pub selectivity: f64,
}

impl RestrictInfo {
    /// Wraps an ordinary per-row filter clause.
    pub fn new(clause: Expr, selectivity: f64) -> Self {
        Self {
            clause,
            pseudoconstant: false,
            selectivity,
        }
    }

    /// Wraps a pseudoconstant gating clause.
    pub fn pseudoconstant(clause: Expr) -> Self {
        Self {
            clause,
            pseudoconstant: true,
            selectivity: 1.0,
        }
    }
}

/// Private planning state copied from the foreign table's options.
///
/// Fields are optional because they are filled option by option; the plan
/// builder reports a missing one as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanningContext {
    pub schema_name: Option<String>,
    pub table_name: Option<String>,
}

/// A candidate access path for a foreign relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignPath {
    /// Estimated output rows.
    pub rows: f64,
    /// Cost before the first row is returned.
    pub startup_cost: f64,
    /// Cost to return every row.
    pub total_cost: f64,
    /// Sort keys the output is ordered by (empty: unordered).
    pub pathkeys: Vec<String>,
    /// Relations that must be scanned first to supply lateral references.
    pub required_outer: BTreeSet<u32>,
}

/// A base relation as seen by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRel {
    /// Relation id.
    pub relid: u32,
    /// Estimated total rows, or negative when unknown.
    pub tuples: f64,
    /// Estimated pages.
    pub pages: u32,
    /// Estimated rows after restriction clauses.
    pub rows: f64,
    /// Estimated average width of one output row in bytes.
    pub width: u32,
    /// Relations referenced laterally from the target list.
    pub lateral_relids: BTreeSet<u32>,
    /// Restriction clauses on this relation.
    pub baserestrictinfo: Vec<RestrictInfo>,
    /// Wrapper-private state attached during size estimation.
    pub fdw_private: Option<PlanningContext>,
    /// Candidate access paths.
    pub pathlist: Vec<ForeignPath>,
}

impl BaseRel {
    /// Creates a relation with no statistics.
    pub fn new(relid: u32, width: u32) -> Self {
        Self {
            relid,
            tuples: -1.0,
            pages: 0,
            rows: 0.0,
            width,
            lateral_relids: BTreeSet::new(),
            baserestrictinfo: Vec::new(),
            fdw_private: None,
            pathlist: Vec::new(),
        }
    }

    /// Registers a candidate path.
    pub fn add_path(&mut self, path: ForeignPath) {
        self.pathlist.push(path);
    }

    /// Returns the path with the lowest total cost, preferring earlier paths on ties.
    pub fn cheapest_total_path(&self) -> Option<&ForeignPath> {
        self.pathlist.iter().reduce(|best, p| {
            if p.total_cost < best.total_cost { p } else { best }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(total_cost: f64) -> ForeignPath {
        ForeignPath {
            rows: 1.0,
            startup_cost: 1.0,
            total_cost,
            pathkeys: Vec::new(),
            required_outer: BTreeSet::new(),
        }
    }

    #[test]
    fn test_new_rel_has_unknown_tuples() {
        let rel = BaseRel::new(5, 40);
        assert!(rel.tuples < 0.0);
        assert!(rel.pathlist.is_empty());
        assert!(rel.cheapest_total_path().is_none());
    }

    #[test]
    fn test_cheapest_total_path() {
        let mut rel = BaseRel::new(1, 8);
        rel.add_path(path(10.0));
        rel.add_path(path(5.0));
        rel.add_path(path(5.0));
        assert_eq!(rel.cheapest_total_path().unwrap().total_cost, 5.0);
        assert!(std::ptr::eq(
            rel.cheapest_total_path().unwrap(),
            &rel.pathlist[1]
        ));
    }
}
