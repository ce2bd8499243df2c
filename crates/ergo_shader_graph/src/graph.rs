// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{NodeId, NodeOperation, ShaderNode};
use crate::port::DataType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A shader node graph.
///
/// Mutation is permissive: unknown node ids turn into no-ops or sentinel
/// return values instead of errors, so an editor can apply user edits in any
/// order. Use [`Graph::validate`] before handing the graph to a generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    name: String,
    /// Nodes in insertion order
    nodes: IndexMap<NodeId, ShaderNode>,
    /// Connections between nodes
    connections: Vec<Connection>,
    next_node_id: u32,
    next_conn_id: u64,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: Vec::new(),
            next_node_id: 1,
            next_conn_id: 1,
        }
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the graph
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Add a node to the graph, assigning it a fresh id
    pub fn add_node(&mut self, mut node: ShaderNode) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        node.id = id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and every connection touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<ShaderNode> {
        let node = self.nodes.shift_remove(&node_id)?;
        self.connections.retain(|c| !c.involves_node(node_id));
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&ShaderNode> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut ShaderNode> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ShaderNode> {
        self.nodes.values()
    }

    /// Get all node IDs in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Connections
    // ========================================================================

    /// Connect an output port to an input port.
    ///
    /// Returns [`ConnectionId::INVALID`] if either node is unknown. An input
    /// accepts a single connection: if `(to_node, to_port)` is already fed,
    /// the existing connection is re-sourced and keeps its id. Port indices
    /// and types are not checked; see [`Graph::connect_checked`].
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: usize,
        to_node: NodeId,
        to_port: usize,
    ) -> ConnectionId {
        if !self.nodes.contains_key(&from_node) || !self.nodes.contains_key(&to_node) {
            return ConnectionId::INVALID;
        }

        if let Some(existing) = self
            .connections
            .iter_mut()
            .find(|c| c.targets(to_node, to_port))
        {
            tracing::trace!(
                connection = existing.id.0,
                from = from_node.0,
                to = to_node.0,
                "re-sourcing connection"
            );
            existing.source_node = from_node;
            existing.source_port = from_port;
            return existing.id;
        }

        let id = ConnectionId(self.next_conn_id);
        self.next_conn_id += 1;
        self.connections.push(Connection {
            id,
            source_node: from_node,
            source_port: from_port,
            target_node: to_node,
            target_port: to_port,
        });
        id
    }

    /// Connect with full checking: nodes and port indices must exist, the
    /// endpoints must differ, and the port types must be compatible.
    pub fn connect_checked(
        &mut self,
        from_node: NodeId,
        from_port: usize,
        to_node: NodeId,
        to_port: usize,
    ) -> Result<ConnectionId, ConnectionError> {
        let source = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        let source_port = source.output(from_port).ok_or(ConnectionError::PortNotFound {
            node: from_node,
            port: from_port,
        })?;
        let target_port = target.input(to_port).ok_or(ConnectionError::PortNotFound {
            node: to_node,
            port: to_port,
        })?;

        if !source_port.data_type.can_connect_to(target_port.data_type) {
            return Err(ConnectionError::IncompatiblePorts {
                from: source_port.data_type,
                to: target_port.data_type,
            });
        }

        Ok(self.connect(from_node, from_port, to_node, to_port))
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == connection_id)?;
        Some(self.connections.remove(index))
    }

    /// Remove every connection feeding `node_id`, returning how many went
    pub fn disconnect_inputs(&mut self, node_id: NodeId) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| c.target_node != node_id);
        before - self.connections.len()
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// Get all connections in creation order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The connection feeding an input port, if any
    pub fn find_input_connection(&self, node_id: NodeId, port: usize) -> Option<&Connection> {
        self.connections.iter().find(|c| c.targets(node_id, port))
    }

    /// Connections consuming one output port
    pub fn find_output_connections(
        &self,
        node_id: NodeId,
        port: usize,
    ) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| c.source_node == node_id && c.source_port == port)
    }

    /// Connections consuming any output of a node
    pub fn connections_from(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.source_node == node_id)
    }

    /// Check if any connection touches a node
    pub fn is_node_connected(&self, node_id: NodeId) -> bool {
        self.connections.iter().any(|c| c.involves_node(node_id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The surface output node. With several outputs the first inserted one
    /// wins; [`Graph::validate`] rejects that case.
    pub fn find_output_node(&self) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.is_output())
            .map(|n| n.id)
    }

    /// Get nodes in evaluation order (dependencies first).
    ///
    /// Kahn's algorithm. Ready nodes sit on a stack seeded in insertion
    /// order, so among equally ready nodes the most recently pushed goes
    /// first. If the graph has a cycle the result is shorter than
    /// [`Graph::node_count`].
    pub fn topological_sort(&self) -> Vec<NodeId> {
        let mut in_degree: HashMap<NodeId, usize> =
            self.nodes.keys().map(|id| (*id, 0)).collect();
        let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for conn in &self.connections {
            if !self.nodes.contains_key(&conn.source_node) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(&conn.target_node) {
                *degree += 1;
                successors
                    .entry(conn.source_node)
                    .or_default()
                    .push(conn.target_node);
            }
        }

        let mut ready: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();
        let mut sorted = Vec::with_capacity(self.nodes.len());

        while let Some(current) = ready.pop() {
            sorted.push(current);

            let Some(next) = successors.get(&current) else {
                continue;
            };
            for target in next {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(*target);
                    }
                }
            }
        }

        sorted
    }

    /// True iff the graph has exactly one output node and no cycle
    pub fn validate(&self) -> bool {
        let output_count = self.nodes.values().filter(|n| n.is_output()).count();
        if output_count != 1 {
            return false;
        }

        self.topological_sort().len() == self.nodes.len()
    }

    /// Advisory type check between an output and an input port type
    pub fn types_compatible(from: DataType, to: DataType) -> bool {
        from.can_connect_to(to)
    }

    /// Uniforms declared by property and texture nodes, in node order
    pub fn collect_uniforms(&self) -> Vec<(String, DataType)> {
        self.nodes
            .values()
            .filter_map(|node| match &node.operation {
                NodeOperation::PropertyFloat { uniform_name, .. } => {
                    Some((uniform_name.clone(), DataType::Float))
                }
                NodeOperation::PropertyVec4 { uniform_name, .. } => {
                    Some((uniform_name.clone(), DataType::Vec4))
                }
                NodeOperation::TextureSample {
                    texture_uniform, ..
                } => Some((texture_uniform.clone(), DataType::Texture2D)),
                _ => None,
            })
            .collect()
    }

    /// Report connections that a strict consumer would reject. Never mutates.
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues = Vec::new();

        for conn in &self.connections {
            let Some(source) = self.nodes.get(&conn.source_node) else {
                issues.push(LintIssue::MissingNode {
                    connection: conn.id,
                    node: conn.source_node,
                });
                continue;
            };
            let Some(target) = self.nodes.get(&conn.target_node) else {
                issues.push(LintIssue::MissingNode {
                    connection: conn.id,
                    node: conn.target_node,
                });
                continue;
            };

            let source_port = source.output(conn.source_port);
            let target_port = target.input(conn.target_port);
            if source_port.is_none() {
                issues.push(LintIssue::PortOutOfRange {
                    connection: conn.id,
                    node: conn.source_node,
                    port: conn.source_port,
                });
            }
            if target_port.is_none() {
                issues.push(LintIssue::PortOutOfRange {
                    connection: conn.id,
                    node: conn.target_node,
                    port: conn.target_port,
                });
            }

            if let (Some(from), Some(to)) = (source_port, target_port) {
                if !from.data_type.can_connect_to(to.data_type) {
                    issues.push(LintIssue::TypeMismatch {
                        connection: conn.id,
                        from: from.data_type,
                        to: to.data_type,
                    });
                }
            }
        }

        issues
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// A problem found by [`Graph::lint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    /// Connection references a node that no longer exists
    MissingNode {
        /// Offending connection
        connection: ConnectionId,
        /// Missing node
        node: NodeId,
    },
    /// Connection addresses a port index the node does not have
    PortOutOfRange {
        /// Offending connection
        connection: ConnectionId,
        /// Node lacking the port
        node: NodeId,
        /// Port index
        port: usize,
    },
    /// Connected port types are not compatible
    TypeMismatch {
        /// Offending connection
        connection: ConnectionId,
        /// Source port type
        from: DataType,
        /// Target port type
        to: DataType,
    },
}

/// Error from [`Graph::connect_checked`]
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port {port} not found on node {node:?}")]
    PortNotFound {
        /// Node
        node: NodeId,
        /// Port index
        port: usize,
    },

    /// Incompatible port types
    #[error("Incompatible port types: {from} -> {to}")]
    IncompatiblePorts {
        /// Source type
        from: DataType,
        /// Target type
        to: DataType,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}
