// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimization pass results.

use std::fmt;

/// One pass run that changed the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassResult {
    /// Pass name, e.g. `ConstantFolding`
    pub pass_name: String,
    /// Number of nodes rewritten or removed
    pub changes_made: u32,
    /// Human-readable summary
    pub description: String,
}

/// Accumulated results of one `optimize_graph` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizationReport {
    results: Vec<PassResult>,
}

impl OptimizationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pass result
    pub fn push(&mut self, result: PassResult) {
        self.results.push(result);
    }

    /// Forget all results
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Results in the order the passes ran
    pub fn results(&self) -> &[PassResult] {
        &self.results
    }

    /// Whether no pass changed anything
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Sum of changes across all results
    pub fn total_changes(&self) -> u32 {
        self.results.iter().map(|r| r.changes_made).sum()
    }

    /// Sum of changes made by one pass across all iterations
    pub fn changes_for(&self, pass_name: &str) -> u32 {
        self.results
            .iter()
            .filter(|r| r.pass_name == pass_name)
            .map(|r| r.changes_made)
            .sum()
    }
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return writeln!(f, "No optimizations applied.");
        }

        writeln!(f, "=== Shader Optimization Report ===")?;
        for result in &self.results {
            writeln!(f, "  [{}] {}", result.pass_name, result.description)?;
        }
        writeln!(f, "  Total changes: {}", self.total_changes())?;
        writeln!(f, "==================================")
    }
}
