// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dead node elimination.

use super::GraphPass;
use ergo_shader_graph::{Graph, NodeId};
use std::collections::HashSet;

/// Removes every node the surface output does not (transitively) read.
///
/// Graphs without an output node are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadNodeElimination;

impl GraphPass for DeadNodeElimination {
    fn name(&self) -> &'static str {
        "DeadNodeElimination"
    }

    fn run(&self, graph: &mut Graph) -> u32 {
        let Some(output) = graph.find_output_node() else {
            return 0;
        };

        let mut reachable = HashSet::from([output]);
        let mut stack = vec![output];

        while let Some(current) = stack.pop() {
            let Some(node) = graph.node(current) else {
                continue;
            };
            for port in 0..node.inputs.len() {
                if let Some(conn) = graph.find_input_connection(current, port) {
                    if reachable.insert(conn.source_node) {
                        stack.push(conn.source_node);
                    }
                }
            }
        }

        let dead: Vec<NodeId> = graph
            .node_ids()
            .filter(|id| !reachable.contains(id))
            .collect();

        for id in &dead {
            tracing::trace!(node = id.0, "removing unreachable node");
            graph.remove_node(*id);
        }

        dead.len() as u32
    }

    fn describe(&self, changes: u32) -> String {
        format!("Removed {changes} unreachable nodes")
    }
}
