// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Scalar float
    Float,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector / color
    Vec4,
    /// 3x3 matrix
    Mat3,
    /// 4x4 matrix
    Mat4,
    /// 2D texture
    Texture2D,
    /// Texture sampler
    Sampler,
    /// Boolean
    Bool,
}

impl DataType {
    /// Shading-language spelling of this type
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
            Self::Texture2D => "texture2D",
            Self::Sampler => "sampler",
            Self::Bool => "bool",
        }
    }

    /// Check if a value of this type can feed a port of type `to`.
    ///
    /// Advisory only: [`Graph::connect`](crate::Graph::connect) does not
    /// consult it.
    pub fn can_connect_to(self, to: DataType) -> bool {
        if self == to {
            return true;
        }

        match (self, to) {
            // Scalar broadcast
            (Self::Float, Self::Vec2 | Self::Vec3 | Self::Vec4) => true,
            // Pad with w = 1 / truncate
            (Self::Vec3, Self::Vec4) | (Self::Vec4, Self::Vec3) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value that can be stored in a port or a constant node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShaderValue {
    /// Scalar float
    Float(f32),
    /// 2D vector
    Vec2([f32; 2]),
    /// 3D vector
    Vec3([f32; 3]),
    /// 4D vector
    Vec4([f32; 4]),
    /// Boolean
    Bool(bool),
}

impl ShaderValue {
    /// Get the data type for this value
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Float(_) => DataType::Float,
            Self::Vec2(_) => DataType::Vec2,
            Self::Vec3(_) => DataType::Vec3,
            Self::Vec4(_) => DataType::Vec4,
            Self::Bool(_) => DataType::Bool,
        }
    }

    /// The plain scalar held by this value, if any
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl Default for ShaderValue {
    fn default() -> Self {
        Self::Float(0.0)
    }
}

impl From<f32> for ShaderValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ShaderValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name
    pub name: String,
    /// Data type
    pub data_type: DataType,
    /// Value used when the port is unconnected
    pub default_value: ShaderValue,
}

impl Port {
    /// Create a new port with a zero default
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            data_type,
            default_value: ShaderValue::default(),
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<ShaderValue>) -> Self {
        self.default_value = value.into();
        self
    }
}
