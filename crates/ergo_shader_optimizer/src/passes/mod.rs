// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph rewrite passes.

mod constant_folding;
mod dead_node;
mod identity;

pub use constant_folding::ConstantFolding;
pub use dead_node::DeadNodeElimination;
pub use identity::IdentityRemoval;

use ergo_shader_graph::{Graph, NodeId, ShaderValue};

/// A rewrite over a shader graph.
///
/// `run` must return the number of nodes it removed or rewrote, and zero
/// once the graph is at its fixed point for this pass.
pub trait GraphPass {
    /// Name shown in reports
    fn name(&self) -> &'static str;

    /// Apply the pass once
    fn run(&self, graph: &mut Graph) -> u32;

    /// Report line for a run that made `changes` changes
    fn describe(&self, changes: u32) -> String;
}

/// Rewrite a node into a literal: drop its input connections, clear its
/// inputs, and give it a descriptive name.
pub(crate) fn fold_to_constant(graph: &mut Graph, node_id: NodeId, value: ShaderValue) {
    graph.disconnect_inputs(node_id);

    let Some(node) = graph.node_mut(node_id) else {
        return;
    };
    let output_type = node
        .output(0)
        .map_or_else(|| value.data_type(), |port| port.data_type);
    node.make_constant(value, output_type);
    node.name = match value {
        ShaderValue::Float(v) => format!("Const({v})"),
        _ => "Const".to_string(),
    };
}
