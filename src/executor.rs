//! Host-side driver for foreign scans.
//!
//! Plays the engine's part around a [`ForeignDataWrapper`](crate::fdw::ForeignDataWrapper):
//! runs the planning callbacks for a catalog relation, drives a scan node
//! through the execution callbacks and formats EXPLAIN output.

mod explain;
mod node;
mod planner;

pub use explain::{ExplainOutput, explain_foreign_scan};
pub use node::ForeignScanNode;
pub use planner::plan_foreign_scan;
