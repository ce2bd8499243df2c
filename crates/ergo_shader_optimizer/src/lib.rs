// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimizer for Ergo shader graphs.
//!
//! Two layers of rewriting happen before a material reaches the GPU:
//! - Graph passes run to a fixed point over a [`Graph`](ergo_shader_graph::Graph):
//!   dead node elimination, constant folding, identity removal
//! - Source passes run once over generated shader text: dead temporary
//!   removal, literal folding, identity simplification
//!
//! The [`ShaderOptimizer`] owns no graph. Callers pass the graph they own
//! and read back an [`OptimizationReport`].

pub mod config;
pub mod error;
pub mod optimizer;
pub mod passes;
pub mod report;
pub mod source;

pub use config::OptimizerConfig;
pub use error::ConfigError;
pub use optimizer::{ShaderOptimizer, MAX_ITERATIONS};
pub use report::{OptimizationReport, PassResult};
