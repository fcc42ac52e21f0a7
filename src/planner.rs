//! Planning callbacks for a foreign relation.
//!
//! # Architecture
//!
//! ```text
//! BaseRel (tuples unknown)
//!       |
//! [estimate_rel_size] -- copies options into PlanningContext, 10-page guess
//!       |
//! [propose_paths]     -- one unordered full-scan ForeignPath
//!       |
//! [build_plan]        -- SELECT * FROM schema.table + local quals
//!       |
//! PlanFragment (shared by every execution of the plan)
//! ```

mod estimate;
mod path;
mod plan;
mod rel;

pub use estimate::{
    SizeEstimates, StandardEstimates, UNKNOWN_REL_PAGES, clamp_row_est, estimate_rel_size,
};
pub use path::propose_paths;
pub use plan::{PlanFragment, build_plan, build_remote_query, extract_actual_clauses};
pub use rel::{BaseRel, ForeignPath, PlanningContext, RestrictInfo};
