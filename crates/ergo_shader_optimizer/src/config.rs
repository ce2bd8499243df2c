// SPDX-License-Identifier: MIT OR Apache-2.0
//! Optimizer configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Which passes the optimizer runs.
///
/// Each toggle gates one graph pass and the source pass of the same kind.
/// Fields missing from a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Constant folding (graph) and literal folding (source)
    pub constant_folding: bool,
    /// Dead node elimination (graph) and dead assignment removal (source)
    pub dead_code_elimination: bool,
    /// Identity removal (graph) and identity simplification (source)
    pub algebraic_simplification: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            constant_folding: true,
            dead_code_elimination: true,
            algebraic_simplification: true,
        }
    }
}

impl OptimizerConfig {
    /// Every pass disabled
    pub fn none() -> Self {
        Self {
            constant_folding: false,
            dead_code_elimination: false,
            algebraic_simplification: false,
        }
    }

    /// Parse a config from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize the config to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = OptimizerConfig::default();
        assert!(config.constant_folding);
        assert!(config.dead_code_elimination);
        assert!(config.algebraic_simplification);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = OptimizerConfig::from_ron("(constant_folding: false)").unwrap();
        assert!(!config.constant_folding);
        assert!(config.dead_code_elimination);
        assert!(config.algebraic_simplification);
    }

    #[test]
    fn test_serialization() {
        let config = OptimizerConfig::none();
        let text = config.to_ron().unwrap();
        assert_eq!(OptimizerConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        let err = OptimizerConfig::from_ron("(constant_folding: 3)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
