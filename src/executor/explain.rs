//! EXPLAIN output for foreign scans.

use std::fmt;

use crate::catalog::ForeignTable;
use crate::fdw::ForeignDataWrapper;
use crate::planner::PlanFragment;

/// Accumulates `label: value` lines of EXPLAIN output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplainOutput {
    lines: Vec<String>,
    indent: usize,
}

impl ExplainOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line at the current indentation.
    pub fn line(&mut self, text: impl fmt::Display) {
        self.lines.push(format!("{}{}", "  ".repeat(self.indent), text));
    }

    /// Adds a `label: value` property.
    pub fn property_text(&mut self, label: &str, value: &str) {
        self.line(format_args!("{label}: {value}"));
    }

    /// Runs `f` with indentation increased by one level.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for ExplainOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Formats a foreign scan plan as a human-readable EXPLAIN string.
///
/// # Example output
///
/// ```text
/// Foreign Scan on items  (cost=1.00..39.25 rows=2925)
///   Filter: (id > 1)
///   Remote Query: SELECT * FROM public.items
/// ```
pub fn explain_foreign_scan<W: ForeignDataWrapper>(
    fdw: &W,
    table: &ForeignTable,
    plan: &PlanFragment,
) -> ExplainOutput {
    let mut out = ExplainOutput::new();
    out.line(format_args!(
        "Foreign Scan on {}  (cost={:.2}..{:.2} rows={})",
        table.name, plan.startup_cost, plan.total_cost, plan.rows
    ));
    out.indented(|out| {
        if !plan.local_quals.is_empty() {
            let quals: Vec<String> = plan.local_quals.iter().map(ToString::to_string).collect();
            out.property_text("Filter", &quals.join(" AND "));
        }
        fdw.explain_foreign_scan(plan, out);
    });
    out
}
