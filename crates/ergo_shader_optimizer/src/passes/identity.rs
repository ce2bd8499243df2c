// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identity and algebraic removal: `x + 0`, `x - 0`, `x * 1`, `x / 1`,
//! `x ^ 1` become `x`; `x * 0` becomes `0`.

use super::{fold_to_constant, GraphPass};
use ergo_shader_graph::evaluation::resolve_scalar;
use ergo_shader_graph::{Graph, MathOp, NodeId, NodeOperation, ShaderValue};

/// What to do with an identity node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rewrite {
    /// Forward the operand at this input index to every consumer
    Bypass(usize),
    /// Replace the node with a zero literal
    Zero,
}

/// Pick the rewrite for a binary math node given its resolved operands.
/// Earlier arms win.
fn classify(op: MathOp, a: Option<f32>, b: Option<f32>) -> Option<Rewrite> {
    let is = |operand: Option<f32>, k: f32| operand == Some(k);

    match op {
        MathOp::Add if is(b, 0.0) => Some(Rewrite::Bypass(0)),
        MathOp::Add if is(a, 0.0) => Some(Rewrite::Bypass(1)),
        MathOp::Subtract if is(b, 0.0) => Some(Rewrite::Bypass(0)),
        MathOp::Multiply if is(b, 1.0) => Some(Rewrite::Bypass(0)),
        MathOp::Multiply if is(a, 1.0) => Some(Rewrite::Bypass(1)),
        MathOp::Multiply if is(a, 0.0) || is(b, 0.0) => Some(Rewrite::Zero),
        MathOp::Divide if is(b, 1.0) => Some(Rewrite::Bypass(0)),
        MathOp::Power if is(b, 1.0) => Some(Rewrite::Bypass(0)),
        _ => None,
    }
}

/// Removes binary math nodes that do not change their operand.
///
/// Operands resolve the same way as in constant folding: an unconnected
/// default or a scalar `Constant` source.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRemoval;

impl IdentityRemoval {
    /// Rewrite for `node_id` against the graph as it is now
    fn rewrite_for(graph: &Graph, node_id: NodeId) -> Option<Rewrite> {
        let node = graph.node(node_id)?;
        let NodeOperation::Math(op) = node.operation else {
            return None;
        };
        if node.inputs.len() != 2 {
            return None;
        }

        classify(
            op,
            resolve_scalar(graph, node_id, 0),
            resolve_scalar(graph, node_id, 1),
        )
    }

    /// Forward input `keep` of `node_id` to its consumers and drop the node.
    ///
    /// An unconnected surviving operand has no upstream to forward; the
    /// node becomes a literal holding that operand's default instead.
    fn bypass(graph: &mut Graph, node_id: NodeId, keep: usize) -> bool {
        let upstream = graph
            .find_input_connection(node_id, keep)
            .map(|conn| (conn.source_node, conn.source_port));

        match upstream {
            Some((source, _)) if source == node_id => false,
            Some((source, source_port)) => {
                let consumers: Vec<(NodeId, usize)> = graph
                    .connections_from(node_id)
                    .map(|conn| (conn.target_node, conn.target_port))
                    .collect();

                for (target, target_port) in consumers {
                    graph.connect(source, source_port, target, target_port);
                }
                graph.remove_node(node_id);
                true
            }
            None => {
                let Some(value) = graph
                    .node(node_id)
                    .and_then(|node| node.input(keep))
                    .map(|port| port.default_value)
                else {
                    return false;
                };
                fold_to_constant(graph, node_id, value);
                true
            }
        }
    }
}

impl GraphPass for IdentityRemoval {
    fn name(&self) -> &'static str {
        "IdentityRemoval"
    }

    fn run(&self, graph: &mut Graph) -> u32 {
        let candidates: Vec<NodeId> = graph
            .nodes()
            .filter(|node| matches!(node.operation, NodeOperation::Math(_)))
            .map(|node| node.id)
            .collect();

        let mut removed = 0;
        for id in candidates {
            // Earlier rewrites may have rewired this node's inputs
            let Some(rewrite) = Self::rewrite_for(graph, id) else {
                continue;
            };

            let changed = match rewrite {
                Rewrite::Zero => {
                    fold_to_constant(graph, id, ShaderValue::Float(0.0));
                    true
                }
                Rewrite::Bypass(keep) => Self::bypass(graph, id, keep),
            };

            if changed {
                tracing::trace!(node = id.0, ?rewrite, "removed identity operation");
                removed += 1;
            }
        }

        removed
    }

    fn describe(&self, changes: u32) -> String {
        format!("Removed {changes} identity operations (x+0, x*1, etc.)")
    }
}
