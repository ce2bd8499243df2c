// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compile-time evaluation of constant sub-expressions.

use crate::graph::Graph;
use crate::node::{MathOp, NodeId};

/// Divisors with a magnitude at or below this fold to zero
pub const DIVIDE_EPSILON: f32 = 1e-4;

/// Resolve an input port to a compile-time scalar.
///
/// An unconnected input resolves to its default when that default is a
/// plain scalar. A connected input resolves only when the source node is a
/// scalar `Constant`; properties and other live inputs never resolve.
pub fn resolve_scalar(graph: &Graph, node_id: NodeId, port: usize) -> Option<f32> {
    match graph.find_input_connection(node_id, port) {
        Some(conn) => graph
            .node(conn.source_node)?
            .operation
            .constant_scalar(),
        None => graph.node(node_id)?.input(port)?.default_value.as_scalar(),
    }
}

/// Resolve every input of a node, or `None` if any input is not constant.
/// Nodes without inputs yield `None`; there is nothing to fold.
pub fn resolve_inputs(graph: &Graph, node_id: NodeId) -> Option<Vec<f32>> {
    let node = graph.node(node_id)?;
    if node.inputs.is_empty() {
        return None;
    }

    (0..node.inputs.len())
        .map(|port| resolve_scalar(graph, node_id, port))
        .collect()
}

/// Evaluate a math operator over resolved operands.
///
/// Only the operators with an exact scalar meaning are folded; everything
/// else returns `None` and is left for the generator.
pub fn fold_math(op: MathOp, values: &[f32]) -> Option<f32> {
    let a = *values.first()?;
    let b = values.get(1).copied().unwrap_or(0.0);

    let result = match op {
        MathOp::Add => a + b,
        MathOp::Subtract => a - b,
        MathOp::Multiply => a * b,
        MathOp::Divide => {
            if b.abs() > DIVIDE_EPSILON {
                a / b
            } else {
                0.0
            }
        }
        MathOp::Abs => a.abs(),
        MathOp::Negate => -a,
        MathOp::Floor => a.floor(),
        MathOp::Ceil => a.ceil(),
        MathOp::Min => a.min(b),
        MathOp::Max => a.max(b),
        _ => return None,
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library;

    #[test]
    fn test_fold_supported_ops() {
        assert_eq!(fold_math(MathOp::Add, &[3.0, 5.0]), Some(8.0));
        assert_eq!(fold_math(MathOp::Subtract, &[3.0, 5.0]), Some(-2.0));
        assert_eq!(fold_math(MathOp::Multiply, &[3.0, 5.0]), Some(15.0));
        assert_eq!(fold_math(MathOp::Divide, &[3.0, 2.0]), Some(1.5));
        assert_eq!(fold_math(MathOp::Abs, &[-2.0]), Some(2.0));
        assert_eq!(fold_math(MathOp::Negate, &[2.0]), Some(-2.0));
        assert_eq!(fold_math(MathOp::Floor, &[1.7]), Some(1.0));
        assert_eq!(fold_math(MathOp::Ceil, &[1.2]), Some(2.0));
        assert_eq!(fold_math(MathOp::Min, &[1.0, -1.0]), Some(-1.0));
        assert_eq!(fold_math(MathOp::Max, &[1.0, -1.0]), Some(1.0));
    }

    #[test]
    fn test_divide_by_near_zero_is_zero() {
        assert_eq!(fold_math(MathOp::Divide, &[4.0, 0.00001]), Some(0.0));
        assert_eq!(fold_math(MathOp::Divide, &[4.0, 0.0]), Some(0.0));
        assert_eq!(fold_math(MathOp::Divide, &[4.0, -0.00001]), Some(0.0));
    }

    #[test]
    fn test_unsupported_ops_do_not_fold() {
        assert_eq!(fold_math(MathOp::Power, &[2.0, 3.0]), None);
        assert_eq!(fold_math(MathOp::SquareRoot, &[4.0]), None);
        assert_eq!(fold_math(MathOp::Lerp, &[0.0, 1.0, 0.5]), None);
        assert_eq!(fold_math(MathOp::Add, &[]), None);
    }

    #[test]
    fn test_resolve_scalar_sources() {
        let mut graph = Graph::default();
        let c = graph.add_node(library::constant(3.0));
        let prop = graph.add_node(library::float_property("u_k", 2.0, 0.0, 4.0));
        let add = graph.add_node(library::math(MathOp::Add));
        let lerp = graph.add_node(library::math(MathOp::Lerp));

        graph.connect(c, 0, add, 0);
        graph.connect(prop, 0, lerp, 0);

        assert_eq!(resolve_scalar(&graph, add, 0), Some(3.0));
        // Unconnected default
        assert_eq!(resolve_scalar(&graph, add, 1), Some(0.0));
        // Properties are runtime values
        assert_eq!(resolve_scalar(&graph, lerp, 0), None);
        assert_eq!(resolve_scalar(&graph, lerp, 2), Some(0.5));

        assert_eq!(resolve_inputs(&graph, add), Some(vec![3.0, 0.0]));
        assert_eq!(resolve_inputs(&graph, lerp), None);
        assert_eq!(resolve_inputs(&graph, c), None);
    }

    #[test]
    fn test_vector_defaults_do_not_resolve() {
        let mut graph = Graph::default();
        let out = graph.add_node(library::output());
        assert_eq!(resolve_scalar(&graph, out, 0), None);
        assert_eq!(resolve_scalar(&graph, out, 2), Some(0.0));
    }
}
