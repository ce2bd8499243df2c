// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shader graph.

use crate::port::{DataType, Port, ShaderValue};
use serde::{Deserialize, Serialize};

/// Identifier for a node, allocated by the owning graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id carried by nodes that have not been added to a graph yet
    pub const INVALID: Self = Self(0);

    /// Check if valid
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// Arithmetic operator of a math node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOp {
    /// A + B
    Add,
    /// A - B
    Subtract,
    /// A * B
    Multiply,
    /// A / B
    Divide,
    /// A ^ B
    Power,
    /// sqrt(x)
    SquareRoot,
    /// |x|
    Abs,
    /// min(A, B)
    Min,
    /// max(A, B)
    Max,
    /// clamp(x, min, max)
    Clamp,
    /// mix(A, B, T)
    Lerp,
    /// dot(A, B)
    Dot,
    /// cross(A, B)
    Cross,
    /// normalize(x)
    Normalize,
    /// length(x)
    Length,
    /// -x
    Negate,
    /// fract(x)
    Fract,
    /// floor(x)
    Floor,
    /// ceil(x)
    Ceil,
    /// step(edge, x)
    Step,
    /// smoothstep(e0, e1, x)
    SmoothStep,
}

impl MathOp {
    /// Display name used for freshly constructed nodes
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Power => "Power",
            Self::SquareRoot => "SquareRoot",
            Self::Abs => "Abs",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Clamp => "Clamp",
            Self::Lerp => "Lerp",
            Self::Dot => "Dot",
            Self::Cross => "Cross",
            Self::Normalize => "Normalize",
            Self::Length => "Length",
            Self::Negate => "Negate",
            Self::Fract => "Fract",
            Self::Floor => "Floor",
            Self::Ceil => "Ceil",
            Self::Step => "Step",
            Self::SmoothStep => "SmoothStep",
        }
    }
}

/// Trigonometric function of a trig node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrigOp {
    /// sin(x)
    Sin,
    /// cos(x)
    Cos,
    /// tan(x)
    Tan,
    /// asin(x)
    Asin,
    /// acos(x)
    Acos,
    /// atan(x)
    Atan,
    /// atan2(y, x)
    Atan2,
}

impl TrigOp {
    /// Display name used for freshly constructed nodes
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "Sin",
            Self::Cos => "Cos",
            Self::Tan => "Tan",
            Self::Asin => "Asin",
            Self::Acos => "Acos",
            Self::Atan => "Atan",
            Self::Atan2 => "Atan2",
        }
    }
}

/// Texture lookup flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureOp {
    /// Implicit-LOD sample
    Sample,
    /// Explicit LOD
    SampleLod,
    /// Explicit gradients
    SampleGrad,
    /// LOD bias
    SampleBias,
}

/// Lighting model evaluated by a lighting node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightModel {
    /// Diffuse only
    Lambert,
    /// Diffuse + Blinn-Phong specular
    BlinnPhong,
    /// PBR microfacet
    CookTorrance,
    /// Quantized diffuse
    Toon,
    /// No lighting
    Unlit,
}

impl LightModel {
    /// Display name used for freshly constructed nodes
    pub fn name(self) -> &'static str {
        match self {
            Self::Lambert => "Lambert",
            Self::BlinnPhong => "BlinnPhong",
            Self::CookTorrance => "CookTorrance",
            Self::Toon => "Toon",
            Self::Unlit => "Unlit",
        }
    }
}

/// Color blend mode of a blend node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    /// Lerp by opacity
    Normal,
    /// Base + blend
    Additive,
    /// Base * blend
    Multiply,
    /// Screen
    Screen,
    /// Overlay
    Overlay,
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Input nodes (constants, properties, geometry)
    Input,
    /// Surface output
    Output,
    /// Math operations
    Math,
    /// Texture operations
    Texture,
    /// Lighting models
    Lighting,
    /// Utility nodes (split, combine, blend)
    Utility,
    /// Raw user code
    Custom,
}

/// The operation performed by a node.
///
/// Optimizer rewrites replace this field wholesale, e.g. a folded `Math`
/// node becomes a `Constant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeOperation {
    /// Float material property bound to a uniform
    PropertyFloat {
        /// Initial value
        value: f32,
        /// Editor slider minimum
        min: f32,
        /// Editor slider maximum
        max: f32,
        /// Uniform name
        uniform_name: String,
    },
    /// Color/vec4 material property bound to a uniform
    PropertyVec4 {
        /// Initial value
        value: [f32; 4],
        /// Uniform name
        uniform_name: String,
    },
    /// Arithmetic
    Math(MathOp),
    /// Trigonometry
    Trig(TrigOp),
    /// Texture lookup
    TextureSample {
        /// Lookup flavor
        op: TextureOp,
        /// Texture uniform name
        texture_uniform: String,
    },
    /// Shader time
    Time {
        /// Whether the generator should emit the sine variant
        use_sin: bool,
        /// Time multiplier
        speed: f32,
    },
    /// Surface normal
    Normal {
        /// World rather than object space
        world_space: bool,
        /// Tangent space
        tangent_space: bool,
    },
    /// Fragment position
    Position {
        /// World rather than object space
        world_space: bool,
    },
    /// Direction from fragment to camera
    ViewDirection {
        /// World rather than object space
        world_space: bool,
    },
    /// Lighting model evaluation
    Lighting(LightModel),
    /// Combine scalar channels into a vector
    Combine {
        /// Resulting vector type
        output_type: DataType,
    },
    /// Split a vector into scalar channels
    Split,
    /// Fresnel term
    Fresnel {
        /// Exponent
        power: f32,
    },
    /// Color blend
    Blend(BlendMode),
    /// Literal value
    Constant {
        /// The value
        value: ShaderValue,
        /// Declared output type
        output_type: DataType,
    },
    /// Raw shading-language code
    Custom {
        /// GLSL body
        glsl_code: String,
        /// WGSL body
        wgsl_code: String,
    },
    /// Surface output; the graph root
    Output,
}

impl NodeOperation {
    /// Category of this operation
    pub fn category(&self) -> NodeCategory {
        match self {
            Self::PropertyFloat { .. }
            | Self::PropertyVec4 { .. }
            | Self::Time { .. }
            | Self::Normal { .. }
            | Self::Position { .. }
            | Self::ViewDirection { .. }
            | Self::Constant { .. } => NodeCategory::Input,
            Self::Math(_) | Self::Trig(_) | Self::Fresnel { .. } => NodeCategory::Math,
            Self::TextureSample { .. } => NodeCategory::Texture,
            Self::Lighting(_) => NodeCategory::Lighting,
            Self::Combine { .. } | Self::Split | Self::Blend(_) => NodeCategory::Utility,
            Self::Custom { .. } => NodeCategory::Custom,
            Self::Output => NodeCategory::Output,
        }
    }

    /// The plain scalar held by a `Constant`, if any
    pub fn constant_scalar(&self) -> Option<f32> {
        match self {
            Self::Constant { value, .. } => value.as_scalar(),
            _ => None,
        }
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderNode {
    /// Instance ID, assigned on insertion
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Operation performed by the node
    pub operation: NodeOperation,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
    /// Position in the editor canvas, not interpreted here
    pub position: [f32; 2],
}

impl ShaderNode {
    /// Create a node with no ports. See [`crate::library`] for constructors
    /// that attach the port layout expected by each operation.
    pub fn new(name: impl Into<String>, operation: NodeOperation) -> Self {
        Self {
            id: NodeId::INVALID,
            name: name.into(),
            operation,
            inputs: Vec::new(),
            outputs: Vec::new(),
            position: [0.0, 0.0],
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Append an input port
    pub fn with_input(mut self, port: Port) -> Self {
        self.inputs.push(port);
        self
    }

    /// Append an output port
    pub fn with_output(mut self, port: Port) -> Self {
        self.outputs.push(port);
        self
    }

    /// Get an input port by index
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Get an output port by index
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Whether this node is the surface output
    pub fn is_output(&self) -> bool {
        matches!(self.operation, NodeOperation::Output)
    }

    /// Turn this node into a literal in place. Inputs are dropped; the first
    /// output keeps its port id and takes the value as its default.
    pub fn make_constant(&mut self, value: ShaderValue, output_type: DataType) {
        self.operation = NodeOperation::Constant { value, output_type };
        self.inputs.clear();
        if let Some(out) = self.outputs.first_mut() {
            out.default_value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(NodeOperation::Output.category(), NodeCategory::Output);
        assert_eq!(NodeOperation::Math(MathOp::Add).category(), NodeCategory::Math);
        assert_eq!(NodeOperation::Split.category(), NodeCategory::Utility);
        assert_eq!(
            NodeOperation::Lighting(LightModel::Toon).category(),
            NodeCategory::Lighting
        );
    }

    #[test]
    fn test_make_constant_replaces_operation() {
        let mut node = ShaderNode::new("Add", NodeOperation::Math(MathOp::Add))
            .with_input(Port::new("A", DataType::Float))
            .with_input(Port::new("B", DataType::Float))
            .with_output(Port::new("Out", DataType::Float));
        let out_id = node.outputs[0].id;

        node.make_constant(ShaderValue::Float(8.0), DataType::Float);

        assert_eq!(node.operation.constant_scalar(), Some(8.0));
        assert!(node.inputs.is_empty());
        assert_eq!(node.outputs[0].id, out_id);
        assert_eq!(node.outputs[0].default_value, ShaderValue::Float(8.0));
    }

    #[test]
    fn test_constant_scalar_ignores_vectors() {
        let op = NodeOperation::Constant {
            value: ShaderValue::Vec3([1.0, 0.0, 0.0]),
            output_type: DataType::Vec3,
        };
        assert_eq!(op.constant_scalar(), None);
        assert_eq!(NodeOperation::Math(MathOp::Add).constant_scalar(), None);
    }
}
