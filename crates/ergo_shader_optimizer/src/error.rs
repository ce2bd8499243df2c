// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimizer error types.

/// Error loading or saving an [`OptimizerConfig`](crate::OptimizerConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config text could not be parsed
    #[error("Failed to parse optimizer config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Config could not be serialized
    #[error("Failed to serialize optimizer config: {0}")]
    Serialize(#[from] ron::Error),
}
