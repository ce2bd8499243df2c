// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Identifier for a connection, allocated by the owning graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    /// Sentinel returned when a connection could not be made
    pub const INVALID: Self = Self(0);

    /// Check if valid
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// A directed edge from one node's output port to another node's input port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection ID
    pub id: ConnectionId,
    /// Source node ID
    pub source_node: NodeId,
    /// Output port index on the source node
    pub source_port: usize,
    /// Target node ID
    pub target_node: NodeId,
    /// Input port index on the target node
    pub target_port: usize,
}

impl Connection {
    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source_node == node_id || self.target_node == node_id
    }

    /// Check if this connection feeds a specific input port
    pub fn targets(&self, node_id: NodeId, port: usize) -> bool {
        self.target_node == node_id && self.target_port == port
    }
}
