//! Plan construction for a foreign scan.

use crate::error::PlanError;
use crate::expr::Expr;
use crate::options::{SCHEMA_NAME, TABLE_NAME};
use crate::sql::quote_qualified_identifier;

use super::rel::{BaseRel, ForeignPath, PlanningContext, RestrictInfo};

/// Serialized output of planning a foreign scan.
///
/// Immutable once built and shared by every execution of the compiled plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanFragment {
    /// Relation id of the scanned foreign table.
    pub scan_relid: u32,
    /// Remote query text.
    pub query: String,
    /// Clauses the executor re-checks against every fetched row.
    pub local_quals: Vec<Expr>,
    /// Estimated rows of the chosen path.
    pub rows: f64,
    /// Startup cost of the chosen path.
    pub startup_cost: f64,
    /// Total cost of the chosen path.
    pub total_cost: f64,
}

/// Strips [`RestrictInfo`] wrappers, keeping clauses whose pseudoconstant flag
/// matches `pseudoconstant`.
pub fn extract_actual_clauses(clauses: &[RestrictInfo], pseudoconstant: bool) -> Vec<Expr> {
    clauses
        .iter()
        .filter(|ri| ri.pseudoconstant == pseudoconstant)
        .map(|ri| ri.clause.clone())
        .collect()
}

/// Builds the remote query for a relation: every column, no filter.
///
/// Both qualifiers are quoted separately so an option value cannot escape its
/// identifier position.
pub fn build_remote_query(schema_name: &str, table_name: &str) -> String {
    format!(
        "SELECT * FROM {}",
        quote_qualified_identifier(schema_name, table_name)
    )
}

/// Builds the plan fragment for the chosen path.
///
/// Every non-pseudoconstant scan clause becomes a local qual; none of them is
/// pushed into the remote query.
///
/// # Errors
///
/// Returns [`PlanError`] if size estimation never attached a planning context
/// or the context lacks a qualifier.
pub fn build_plan(
    rel: &BaseRel,
    best_path: &ForeignPath,
    scan_clauses: &[RestrictInfo],
) -> Result<PlanFragment, PlanError> {
    let ctx = rel
        .fdw_private
        .as_ref()
        .ok_or(PlanError::MissingPlanningContext { relid: rel.relid })?;
    let (schema_name, table_name) = qualifiers(ctx, rel.relid)?;

    Ok(PlanFragment {
        scan_relid: rel.relid,
        query: build_remote_query(schema_name, table_name),
        local_quals: extract_actual_clauses(scan_clauses, false),
        rows: best_path.rows,
        startup_cost: best_path.startup_cost,
        total_cost: best_path.total_cost,
    })
}

fn qualifiers(ctx: &PlanningContext, relid: u32) -> Result<(&str, &str), PlanError> {
    let schema_name = ctx.schema_name.as_deref().ok_or(PlanError::MissingQualifier {
        relid,
        option: SCHEMA_NAME,
    })?;
    let table_name = ctx.table_name.as_deref().ok_or(PlanError::MissingQualifier {
        relid,
        option: TABLE_NAME,
    })?;
    Ok((schema_name, table_name))
}
