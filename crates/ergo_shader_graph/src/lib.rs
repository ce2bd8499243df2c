// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node graph IR for the Ergo engine.
//!
//! This crate holds the typed intermediate representation that material
//! graphs are lowered into before code generation:
//! - Nodes carrying a closed set of shader operations
//! - Typed input/output ports with default values
//! - Connections addressed by port index
//! - Topological ordering and structural validation
//!
//! ## Architecture
//!
//! A [`Graph`] owns its nodes and connections. Callers build it through the
//! [`library`] constructors and the permissive mutation API, then hand it to
//! an optimizer or a code generator. Unknown ids never panic: they degrade
//! to no-ops, `None`, or the `INVALID` sentinel ids.

pub mod node;
pub mod port;
pub mod connection;
pub mod graph;
pub mod evaluation;
pub mod library;

pub use node::{
    BlendMode, LightModel, MathOp, NodeCategory, NodeId, NodeOperation, ShaderNode, TextureOp,
    TrigOp,
};
pub use port::{DataType, Port, PortId, ShaderValue};
pub use connection::{Connection, ConnectionId};
pub use graph::{ConnectionError, Graph, LintIssue};
