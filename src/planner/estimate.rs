//! Relation size estimation without remote statistics.

use crate::options::{DefElem, SCHEMA_NAME, TABLE_NAME};
use crate::settings::Settings;

use super::rel::{BaseRel, PlanningContext};

/// Page count assumed for a relation of unknown size.
pub const UNKNOWN_REL_PAGES: u32 = 10;

/// The engine's routine for finishing a relation's size estimate.
///
/// Runs after the wrapper has filled in `tuples` and `pages`, so engine-wide
/// normalization of `rows` applies to foreign relations too.
pub trait SizeEstimates {
    fn set_baserel_size_estimates(&self, rel: &mut BaseRel);
}

/// Default finishing routine: applies restriction selectivity to `tuples`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEstimates;

impl SizeEstimates for StandardEstimates {
    fn set_baserel_size_estimates(&self, rel: &mut BaseRel) {
        let selectivity: f64 = rel
            .baserestrictinfo
            .iter()
            .filter(|ri| !ri.pseudoconstant)
            .map(|ri| ri.selectivity.clamp(0.0, 1.0))
            .product();
        rel.rows = clamp_row_est(rel.tuples * selectivity);
    }
}

/// Rounds a row estimate and clamps it to at least one row.
pub fn clamp_row_est(rows: f64) -> f64 {
    if rows.is_nan() || rows <= 1.0 {
        1.0
    } else {
        rows.round()
    }
}

/// Estimates the size of a foreign relation.
///
/// Copies `schema_name`/`table_name` from `options` into the relation's
/// [`PlanningContext`]. When `rel.tuples` is negative (unknown), assumes
/// [`UNKNOWN_REL_PAGES`] pages and derives the row count from how many rows of
/// `rel.width` bytes plus an aligned row header fit in them. Always finishes
/// with the engine's [`SizeEstimates`] routine.
pub fn estimate_rel_size(
    rel: &mut BaseRel,
    options: &[DefElem],
    settings: &Settings,
    estimates: &impl SizeEstimates,
) {
    let mut ctx = PlanningContext::default();
    for def in options {
        match def.name.as_str() {
            TABLE_NAME => ctx.table_name = Some(def.value.clone()),
            SCHEMA_NAME => ctx.schema_name = Some(def.value.clone()),
            _ => {}
        }
    }
    rel.fdw_private = Some(ctx);

    if rel.tuples < 0.0 {
        let space = u64::from(UNKNOWN_REL_PAGES) * u64::from(settings.block_size);
        let header = u64::from(settings.aligned_tuple_header_size());
        let per_row = (u64::from(rel.width) + header).max(1);
        rel.pages = UNKNOWN_REL_PAGES;
        // A row wider than the whole guess still counts as one row.
        rel.tuples = (space / per_row).max(1) as f64;
    }

    estimates.set_baserel_size_estimates(rel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::Value;
    use crate::expr::Expr;
    use crate::planner::RestrictInfo;

    fn opts() -> Vec<DefElem> {
        vec![
            DefElem::new(SCHEMA_NAME, "public"),
            DefElem::new(TABLE_NAME, "items"),
        ]
    }

    #[test]
    fn test_unknown_size_uses_ten_pages() {
        let mut rel = BaseRel::new(1, 40);
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(rel.pages, 10);
        // (10 * 8192) / (40 + 24)
        assert_eq!(rel.tuples, 1280.0);
        assert_eq!(rel.rows, 1280.0);
    }

    #[test]
    fn test_planning_context_is_attached() {
        let mut rel = BaseRel::new(1, 40);
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(
            rel.fdw_private,
            Some(PlanningContext {
                schema_name: Some("public".to_string()),
                table_name: Some("items".to_string()),
            })
        );
    }

    #[test]
    fn test_known_size_is_kept() {
        let mut rel = BaseRel::new(1, 40);
        rel.tuples = 500.0;
        rel.pages = 3;
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(rel.pages, 3);
        assert_eq!(rel.tuples, 500.0);
        assert_eq!(rel.rows, 500.0);
    }

    #[test]
    fn test_zero_known_size_is_kept() {
        let mut rel = BaseRel::new(1, 40);
        rel.tuples = 0.0;
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(rel.pages, 0);
        assert_eq!(rel.tuples, 0.0);
        assert_eq!(rel.rows, 1.0);
    }

    #[test]
    fn test_huge_width_still_positive() {
        let mut rel = BaseRel::new(1, 1_000_000);
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(rel.tuples, 1.0);
    }

    #[test]
    fn test_zero_width_without_header_does_not_panic() {
        let settings = Settings {
            heap_tuple_header_size: 0,
            ..Settings::default()
        };
        let mut rel = BaseRel::new(1, 0);
        estimate_rel_size(&mut rel, &opts(), &settings, &StandardEstimates);
        assert_eq!(rel.pages, 10);
        assert_eq!(rel.tuples, 81920.0);
    }

    #[test]
    fn test_block_size_setting_is_used() {
        let settings = Settings {
            block_size: 4096,
            ..Settings::default()
        };
        let mut rel = BaseRel::new(1, 8);
        estimate_rel_size(&mut rel, &opts(), &settings, &StandardEstimates);
        assert_eq!(rel.tuples, (40960 / 32) as f64);
    }

    #[test]
    fn test_selectivity_applied_by_finishing_routine() {
        let mut rel = BaseRel::new(1, 40);
        rel.baserestrictinfo = vec![
            RestrictInfo::new(Expr::Const(Value::Boolean(true)), 0.5),
            RestrictInfo::pseudoconstant(Expr::Const(Value::Boolean(true))),
        ];
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &StandardEstimates);
        assert_eq!(rel.rows, 640.0);
    }

    #[test]
    fn test_finishing_routine_always_runs() {
        struct Fixed;
        impl SizeEstimates for Fixed {
            fn set_baserel_size_estimates(&self, rel: &mut BaseRel) {
                rel.rows = 42.0;
            }
        }
        let mut rel = BaseRel::new(1, 40);
        rel.tuples = 7.0;
        estimate_rel_size(&mut rel, &opts(), &Settings::default(), &Fixed);
        assert_eq!(rel.rows, 42.0);
    }

    #[test]
    fn test_clamp_row_est() {
        assert_eq!(clamp_row_est(0.0), 1.0);
        assert_eq!(clamp_row_est(f64::NAN), 1.0);
        assert_eq!(clamp_row_est(2.4), 2.0);
        assert_eq!(clamp_row_est(2.6), 3.0);
    }
}
