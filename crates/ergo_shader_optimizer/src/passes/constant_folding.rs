// SPDX-License-Identifier: MIT OR Apache-2.0
//! Constant folding.

use super::{fold_to_constant, GraphPass};
use ergo_shader_graph::evaluation::{fold_math, resolve_inputs};
use ergo_shader_graph::{Graph, NodeId, NodeOperation, ShaderValue};

/// Replaces math nodes whose operands are all compile-time scalars with a
/// `Constant` holding the result.
///
/// Only one level folds per run; chains collapse over successive
/// iterations of the optimizer as upstream nodes become constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantFolding;

impl GraphPass for ConstantFolding {
    fn name(&self) -> &'static str {
        "ConstantFolding"
    }

    fn run(&self, graph: &mut Graph) -> u32 {
        let view: &Graph = graph;
        let candidates: Vec<(NodeId, f32)> = view
            .nodes()
            .filter_map(|node| {
                let NodeOperation::Math(op) = &node.operation else {
                    return None;
                };
                let values = resolve_inputs(view, node.id)?;
                fold_math(*op, &values).map(|result| (node.id, result))
            })
            .collect();

        for (id, result) in &candidates {
            tracing::trace!(node = id.0, result, "folding math node");
            fold_to_constant(graph, *id, ShaderValue::Float(*result));
        }

        candidates.len() as u32
    }

    fn describe(&self, changes: u32) -> String {
        format!("Folded {changes} constant expressions")
    }
}
