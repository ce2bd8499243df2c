// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimization driver.
//!
//! Graph passes run in a fixed order, repeatedly, until one full iteration
//! changes nothing or [`MAX_ITERATIONS`] is reached. Source passes run once
//! per call.

use crate::config::OptimizerConfig;
use crate::passes::{ConstantFolding, DeadNodeElimination, GraphPass, IdentityRemoval};
use crate::report::{OptimizationReport, PassResult};
use crate::source;
use ergo_shader_graph::Graph;

/// Upper bound on graph pass iterations per `optimize_graph` call
pub const MAX_ITERATIONS: u32 = 16;

/// Shader graph and source optimizer.
///
/// Holds only its configuration and the report of the last
/// [`ShaderOptimizer::optimize_graph`] call; the graph is passed in by the
/// caller each time.
#[derive(Debug, Clone, Default)]
pub struct ShaderOptimizer {
    config: OptimizerConfig,
    report: OptimizationReport,
}

impl ShaderOptimizer {
    /// Create an optimizer with every pass enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an optimizer with a custom configuration
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            report: OptimizationReport::new(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Toggle constant and literal folding
    pub fn set_constant_folding(&mut self, enabled: bool) {
        self.config.constant_folding = enabled;
    }

    /// Toggle dead node and dead assignment elimination
    pub fn set_dead_code_elimination(&mut self, enabled: bool) {
        self.config.dead_code_elimination = enabled;
    }

    /// Toggle identity removal and simplification
    pub fn set_algebraic_simplification(&mut self, enabled: bool) {
        self.config.algebraic_simplification = enabled;
    }

    /// Rewrite `graph` in place until no enabled pass finds work.
    pub fn optimize_graph(&mut self, graph: &mut Graph) -> &OptimizationReport {
        self.report.clear();

        let passes: [(bool, &dyn GraphPass); 3] = [
            (self.config.dead_code_elimination, &DeadNodeElimination),
            (self.config.constant_folding, &ConstantFolding),
            (self.config.algebraic_simplification, &IdentityRemoval),
        ];

        let mut changed = true;
        let mut iteration = 0;

        while changed && iteration < MAX_ITERATIONS {
            changed = false;
            iteration += 1;

            for (enabled, pass) in passes {
                if !enabled {
                    continue;
                }

                let changes = pass.run(graph);
                tracing::debug!(pass = pass.name(), iteration, changes, "ran graph pass");
                if changes > 0 {
                    self.report.push(PassResult {
                        pass_name: pass.name().to_string(),
                        changes_made: changes,
                        description: pass.describe(changes),
                    });
                    changed = true;
                }
            }
        }

        if changed {
            tracing::warn!(
                graph = graph.name(),
                iterations = iteration,
                "shader graph still changing at iteration cap"
            );
        }

        tracing::info!(
            graph = graph.name(),
            iterations = iteration,
            changes = self.report.total_changes(),
            nodes = graph.node_count(),
            "optimized shader graph"
        );

        &self.report
    }

    /// Run the enabled source passes once over generated shader text
    pub fn optimize_source(&self, shader_source: &str) -> String {
        let mut result = shader_source.to_string();

        if self.config.dead_code_elimination {
            let (text, removed) = source::remove_dead_assignments(&result);
            tracing::debug!(removed, "removed dead assignments");
            result = text;
        }
        if self.config.constant_folding {
            result = source::fold_literal_ops(&result);
        }
        if self.config.algebraic_simplification {
            result = source::simplify_identity_ops(&result);
        }

        result
    }

    /// Results of the last `optimize_graph` call
    pub fn results(&self) -> &OptimizationReport {
        &self.report
    }

    /// Human-readable report of the last `optimize_graph` call
    pub fn optimization_report(&self) -> String {
        self.report.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergo_shader_graph::library;
    use ergo_shader_graph::{MathOp, NodeId, NodeOperation};

    fn folded_value(graph: &Graph, id: NodeId) -> Option<f32> {
        graph.node(id)?.operation.constant_scalar()
    }

    #[test]
    fn test_constant_folding_end_to_end() {
        let mut graph = Graph::new("Fold");
        let a = graph.add_node(library::constant(3.0));
        let b = graph.add_node(library::constant(5.0));
        let add = graph.add_node(library::math(MathOp::Add));
        let out = graph.add_node(library::output());
        graph.connect(a, 0, add, 0);
        graph.connect(b, 0, add, 1);
        graph.connect(add, 0, out, 2);

        let mut optimizer = ShaderOptimizer::new();
        optimizer.optimize_graph(&mut graph);

        assert_eq!(folded_value(&graph, add), Some(8.0));
        assert!(graph.node(add).unwrap().inputs.is_empty());
        // The orphaned constants are swept on the next iteration
        assert!(graph.node(a).is_none());
        assert!(graph.node(b).is_none());
        assert_eq!(graph.node_count(), 2);
        assert!(graph.validate());
        assert_eq!(optimizer.results().changes_for("ConstantFolding"), 1);
        assert_eq!(optimizer.results().changes_for("DeadNodeElimination"), 2);
    }

    #[test]
    fn test_chained_folds_propagate() {
        // (2 * 3) - 1, then max with default 0
        let mut graph = Graph::default();
        let two = graph.add_node(library::constant(2.0));
        let three = graph.add_node(library::constant(3.0));
        let one = graph.add_node(library::constant(1.0));
        let mul = graph.add_node(library::math(MathOp::Multiply));
        let sub = graph.add_node(library::math(MathOp::Subtract));
        let max = graph.add_node(library::math(MathOp::Max));
        let out = graph.add_node(library::output());
        graph.connect(two, 0, mul, 0);
        graph.connect(three, 0, mul, 1);
        graph.connect(mul, 0, sub, 0);
        graph.connect(one, 0, sub, 1);
        graph.connect(sub, 0, max, 0);
        graph.connect(max, 0, out, 3);

        let mut optimizer = ShaderOptimizer::new();
        optimizer.optimize_graph(&mut graph);

        let conn = graph.find_input_connection(out, 3).unwrap();
        assert_eq!(folded_value(&graph, conn.source_node), Some(5.0));
        assert_eq!(graph.node_count(), 2);
        assert!(graph.validate());
    }

    #[test]
    fn test_identity_bypass_end_to_end() {
        let mut graph = Graph::default();
        let prop = graph.add_node(library::float_property("u_rough", 0.5, 0.0, 1.0));
        let one = graph.add_node(library::constant(1.0));
        let mul = graph.add_node(library::math(MathOp::Multiply));
        let neg = graph.add_node(library::math(MathOp::Negate));
        let out = graph.add_node(library::output());
        graph.connect(prop, 0, mul, 0);
        graph.connect(one, 0, mul, 1);
        graph.connect(mul, 0, neg, 0);
        graph.connect(mul, 0, out, 3);
        graph.connect(neg, 0, out, 2);

        let mut optimizer = ShaderOptimizer::new();
        optimizer.optimize_graph(&mut graph);

        assert!(graph.node(mul).is_none());
        assert!(graph.node(one).is_none());
        assert!(graph.connections().iter().all(|c| c.source_node != mul));
        assert_eq!(graph.find_input_connection(neg, 0).unwrap().source_node, prop);
        assert_eq!(graph.find_input_connection(out, 3).unwrap().source_node, prop);
        assert_eq!(optimizer.results().changes_for("IdentityRemoval"), 1);
    }

    #[test]
    fn test_dead_node_elimination_reports_one() {
        let mut graph = Graph::default();
        graph.add_node(library::output());
        let extra = graph.add_node(library::time(1.0, false));

        let mut optimizer = ShaderOptimizer::new();
        let report = optimizer.optimize_graph(&mut graph);

        assert_eq!(report.results().len(), 1);
        assert_eq!(report.results()[0].pass_name, "DeadNodeElimination");
        assert_eq!(report.results()[0].changes_made, 1);
        assert!(graph.node(extra).is_none());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut graph = Graph::default();
        let a = graph.add_node(library::constant(4.0));
        let b = graph.add_node(library::constant(0.00001));
        let div = graph.add_node(library::math(MathOp::Divide));
        let time = graph.add_node(library::time(1.0, false));
        let add = graph.add_node(library::math(MathOp::Add));
        let out = graph.add_node(library::output());
        graph.connect(a, 0, div, 0);
        graph.connect(b, 0, div, 1);
        graph.connect(div, 0, add, 1);
        graph.connect(time, 0, add, 0);
        graph.connect(add, 0, out, 2);

        let mut optimizer = ShaderOptimizer::new();
        assert!(optimizer.optimize_graph(&mut graph).total_changes() > 0);
        let nodes_after_first = graph.node_count();

        let report = optimizer.optimize_graph(&mut graph);
        assert_eq!(report.total_changes(), 0);
        assert!(report.is_empty());
        assert_eq!(graph.node_count(), nodes_after_first);
        assert_eq!(optimizer.optimization_report(), "No optimizations applied.\n");

        // 4 / ~0 folded to 0, then time + 0 bypassed
        assert_eq!(graph.find_input_connection(out, 2).unwrap().source_node, time);
    }

    #[test]
    fn test_disabled_passes_do_nothing() {
        let mut graph = Graph::default();
        let a = graph.add_node(library::constant(3.0));
        let add = graph.add_node(library::math(MathOp::Add));
        graph.add_node(library::output());
        graph.add_node(library::time(1.0, false));
        graph.connect(a, 0, add, 0);

        let mut optimizer = ShaderOptimizer::with_config(OptimizerConfig::none());
        let report = optimizer.optimize_graph(&mut graph);

        assert!(report.is_empty());
        assert_eq!(graph.node_count(), 4);
        assert!(matches!(
            graph.node(add).unwrap().operation,
            NodeOperation::Math(MathOp::Add)
        ));
    }

    #[test]
    fn test_folding_without_dead_code_keeps_orphans() {
        let mut graph = Graph::default();
        let a = graph.add_node(library::constant(3.0));
        let add = graph.add_node(library::math(MathOp::Add));
        let out = graph.add_node(library::output());
        graph.connect(a, 0, add, 0);
        graph.connect(add, 0, out, 2);

        let mut optimizer = ShaderOptimizer::new();
        optimizer.set_dead_code_elimination(false);
        optimizer.set_algebraic_simplification(false);
        optimizer.optimize_graph(&mut graph);

        assert_eq!(folded_value(&graph, add), Some(3.0));
        assert!(graph.node(a).is_some());
        assert!(!graph.is_node_connected(a));
        assert!(graph.lint().is_empty());
    }

    #[test]
    fn test_report_text() {
        let mut graph = Graph::default();
        graph.add_node(library::output());
        graph.add_node(library::constant(1.0));
        graph.add_node(library::constant(2.0));

        let mut optimizer = ShaderOptimizer::new();
        optimizer.optimize_graph(&mut graph);

        let text = optimizer.optimization_report();
        assert!(text.contains("[DeadNodeElimination] Removed 2 unreachable nodes"));
        assert!(text.contains("Total changes: 2"));
    }

    #[test]
    fn test_optimize_source_respects_toggles() {
        let src = "    float n1_p0 = 1.0;\n    vec3 n2_p0 = normalize(normalize(n5_p0));\n    color = n2_p0 * 1.0;\n";

        let optimizer = ShaderOptimizer::new();
        assert_eq!(
            optimizer.optimize_source(src),
            "    vec3 n2_p0 = normalize(n5_p0);\n    color = n2_p0;\n"
        );

        let optimizer = ShaderOptimizer::with_config(OptimizerConfig::none());
        assert_eq!(optimizer.optimize_source(src), src);
    }
}
