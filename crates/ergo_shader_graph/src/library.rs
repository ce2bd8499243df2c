// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in shader node constructors.
//!
//! Each constructor fixes the port layout its operation expects. The code
//! generator and the optimizer address ports by index, so the order of
//! inputs and outputs here is part of the contract.

use crate::node::{
    BlendMode, LightModel, MathOp, NodeOperation, ShaderNode, TextureOp, TrigOp,
};
use crate::port::{DataType, Port, ShaderValue};

// ========================================================================
// Property Nodes
// ========================================================================

/// Float material property
pub fn float_property(name: &str, value: f32, min: f32, max: f32) -> ShaderNode {
    ShaderNode::new(
        name,
        NodeOperation::PropertyFloat {
            value,
            min,
            max,
            uniform_name: name.to_string(),
        },
    )
    .with_output(Port::new("Out", DataType::Float).with_default(value))
}

/// Color material property
pub fn color_property(name: &str, rgba: [f32; 4]) -> ShaderNode {
    let [r, g, b, a] = rgba;
    ShaderNode::new(
        name,
        NodeOperation::PropertyVec4 {
            value: rgba,
            uniform_name: name.to_string(),
        },
    )
    .with_output(Port::new("RGBA", DataType::Vec4).with_default(ShaderValue::Vec4(rgba)))
    .with_output(Port::new("RGB", DataType::Vec3).with_default(ShaderValue::Vec3([r, g, b])))
    .with_output(Port::new("R", DataType::Float).with_default(r))
    .with_output(Port::new("G", DataType::Float).with_default(g))
    .with_output(Port::new("B", DataType::Float).with_default(b))
    .with_output(Port::new("A", DataType::Float).with_default(a))
}

// ========================================================================
// Math Nodes
// ========================================================================

/// Math node with the operand layout of `op`
pub fn math(op: MathOp) -> ShaderNode {
    let node = ShaderNode::new(op.name(), NodeOperation::Math(op));

    match op {
        MathOp::Add
        | MathOp::Subtract
        | MathOp::Multiply
        | MathOp::Divide
        | MathOp::Power
        | MathOp::Min
        | MathOp::Max => node
            .with_input(Port::new("A", DataType::Float))
            .with_input(Port::new("B", DataType::Float))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::Clamp => node
            .with_input(Port::new("Value", DataType::Float))
            .with_input(Port::new("Min", DataType::Float).with_default(0.0))
            .with_input(Port::new("Max", DataType::Float).with_default(1.0))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::Lerp => node
            .with_input(Port::new("A", DataType::Float))
            .with_input(Port::new("B", DataType::Float))
            .with_input(Port::new("T", DataType::Float).with_default(0.5))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::Dot => node
            .with_input(Port::new("A", DataType::Vec3))
            .with_input(Port::new("B", DataType::Vec3))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::Cross => node
            .with_input(Port::new("A", DataType::Vec3))
            .with_input(Port::new("B", DataType::Vec3))
            .with_output(Port::new("Out", DataType::Vec3)),
        MathOp::Normalize => node
            .with_input(Port::new("In", DataType::Vec3))
            .with_output(Port::new("Out", DataType::Vec3)),
        MathOp::Length => node
            .with_input(Port::new("In", DataType::Vec3))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::SmoothStep => node
            .with_input(Port::new("Edge0", DataType::Float).with_default(0.0))
            .with_input(Port::new("Edge1", DataType::Float).with_default(1.0))
            .with_input(Port::new("X", DataType::Float))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::Step => node
            .with_input(Port::new("Edge", DataType::Float))
            .with_input(Port::new("X", DataType::Float))
            .with_output(Port::new("Out", DataType::Float)),
        MathOp::SquareRoot
        | MathOp::Abs
        | MathOp::Negate
        | MathOp::Fract
        | MathOp::Floor
        | MathOp::Ceil => node
            .with_input(Port::new("In", DataType::Float))
            .with_output(Port::new("Out", DataType::Float)),
    }
}

/// Trigonometric node
pub fn trig(op: TrigOp) -> ShaderNode {
    let node = ShaderNode::new(op.name(), NodeOperation::Trig(op));
    let node = if op == TrigOp::Atan2 {
        node.with_input(Port::new("Y", DataType::Float))
            .with_input(Port::new("X", DataType::Float))
    } else {
        node.with_input(Port::new("In", DataType::Float))
    };
    node.with_output(Port::new("Out", DataType::Float))
}

// ========================================================================
// Texture Nodes
// ========================================================================

/// Sample a 2D texture bound to `texture_uniform`
pub fn texture_sample(texture_uniform: &str, op: TextureOp) -> ShaderNode {
    let mut node = ShaderNode::new(
        "TextureSample",
        NodeOperation::TextureSample {
            op,
            texture_uniform: texture_uniform.to_string(),
        },
    )
    .with_input(Port::new("UV", DataType::Vec2));

    if matches!(op, TextureOp::SampleLod | TextureOp::SampleBias) {
        node = node.with_input(Port::new("Lod", DataType::Float).with_default(0.0));
    }

    node.with_output(Port::new("RGBA", DataType::Vec4))
        .with_output(Port::new("RGB", DataType::Vec3))
        .with_output(Port::new("R", DataType::Float))
        .with_output(Port::new("G", DataType::Float))
        .with_output(Port::new("B", DataType::Float))
        .with_output(Port::new("A", DataType::Float))
}

// ========================================================================
// Geometry & Time Inputs
// ========================================================================

/// Shader time
pub fn time(speed: f32, use_sin: bool) -> ShaderNode {
    ShaderNode::new("Time", NodeOperation::Time { use_sin, speed })
        .with_output(Port::new("Time", DataType::Float))
        .with_output(Port::new("SinTime", DataType::Float))
        .with_output(Port::new("CosTime", DataType::Float))
}

/// Surface normal
pub fn normal(world_space: bool) -> ShaderNode {
    let name = if world_space { "WorldNormal" } else { "ObjectNormal" };
    ShaderNode::new(
        name,
        NodeOperation::Normal {
            world_space,
            tangent_space: false,
        },
    )
    .with_output(Port::new("Out", DataType::Vec3))
}

/// Fragment position
pub fn position(world_space: bool) -> ShaderNode {
    let name = if world_space { "WorldPosition" } else { "ObjectPosition" };
    ShaderNode::new(name, NodeOperation::Position { world_space })
        .with_output(Port::new("Out", DataType::Vec3))
}

/// Direction from fragment to camera
pub fn view_direction(world_space: bool) -> ShaderNode {
    ShaderNode::new("ViewDirection", NodeOperation::ViewDirection { world_space })
        .with_output(Port::new("Out", DataType::Vec3))
}

// ========================================================================
// Lighting & Color
// ========================================================================

/// Lighting model evaluation
pub fn lighting(model: LightModel) -> ShaderNode {
    let mut node = ShaderNode::new(model.name(), NodeOperation::Lighting(model))
        .with_input(Port::new("Normal", DataType::Vec3))
        .with_input(Port::new("Albedo", DataType::Vec3).with_default(ShaderValue::Vec3([1.0; 3])));

    if matches!(model, LightModel::BlinnPhong | LightModel::CookTorrance) {
        node = node.with_input(Port::new("Specular", DataType::Float).with_default(0.5));
    }
    if model == LightModel::CookTorrance {
        node = node
            .with_input(Port::new("Metallic", DataType::Float).with_default(0.0))
            .with_input(Port::new("Roughness", DataType::Float).with_default(0.5));
    }
    if model == LightModel::Toon {
        node = node.with_input(Port::new("Steps", DataType::Float).with_default(3.0));
    }

    node.with_output(Port::new("Color", DataType::Vec3))
        .with_output(Port::new("Diffuse", DataType::Float))
}

/// Blend two colors
pub fn blend(mode: BlendMode) -> ShaderNode {
    ShaderNode::new("Blend", NodeOperation::Blend(mode))
        .with_input(Port::new("Base", DataType::Vec3))
        .with_input(Port::new("Blend", DataType::Vec3))
        .with_input(Port::new("Opacity", DataType::Float).with_default(1.0))
        .with_output(Port::new("Out", DataType::Vec3))
}

/// Fresnel term
pub fn fresnel(power: f32) -> ShaderNode {
    ShaderNode::new("Fresnel", NodeOperation::Fresnel { power })
        .with_input(Port::new("Normal", DataType::Vec3))
        .with_input(Port::new("ViewDir", DataType::Vec3))
        .with_input(Port::new("Power", DataType::Float).with_default(power))
        .with_output(Port::new("Out", DataType::Float))
}

// ========================================================================
// Vector Utilities
// ========================================================================

/// Split a vector into channels
pub fn split() -> ShaderNode {
    ShaderNode::new("Split", NodeOperation::Split)
        .with_input(Port::new("In", DataType::Vec4))
        .with_output(Port::new("X", DataType::Float))
        .with_output(Port::new("Y", DataType::Float))
        .with_output(Port::new("Z", DataType::Float))
        .with_output(Port::new("W", DataType::Float))
}

/// Combine channels into a vector of `output_type`
pub fn combine(output_type: DataType) -> ShaderNode {
    let mut node = ShaderNode::new("Combine", NodeOperation::Combine { output_type })
        .with_input(Port::new("X", DataType::Float).with_default(0.0))
        .with_input(Port::new("Y", DataType::Float).with_default(0.0));

    if matches!(output_type, DataType::Vec3 | DataType::Vec4) {
        node = node.with_input(Port::new("Z", DataType::Float).with_default(0.0));
    }
    if output_type == DataType::Vec4 {
        node = node.with_input(Port::new("W", DataType::Float).with_default(1.0));
    }

    node.with_output(Port::new("Out", output_type))
}

// ========================================================================
// Constants, Custom Code & Output
// ========================================================================

/// Scalar literal
pub fn constant(value: f32) -> ShaderNode {
    ShaderNode::new(
        "Constant",
        NodeOperation::Constant {
            value: ShaderValue::Float(value),
            output_type: DataType::Float,
        },
    )
    .with_output(Port::new("Out", DataType::Float).with_default(value))
}

/// Vec3 literal
pub fn constant_vec3(x: f32, y: f32, z: f32) -> ShaderNode {
    let value = ShaderValue::Vec3([x, y, z]);
    ShaderNode::new(
        "ConstantVec3",
        NodeOperation::Constant {
            value,
            output_type: DataType::Vec3,
        },
    )
    .with_output(Port::new("Out", DataType::Vec3).with_default(value))
}

/// Raw code node with caller-defined ports
pub fn custom(glsl_code: &str, wgsl_code: &str, inputs: Vec<Port>, outputs: Vec<Port>) -> ShaderNode {
    let mut node = ShaderNode::new(
        "Custom",
        NodeOperation::Custom {
            glsl_code: glsl_code.to_string(),
            wgsl_code: wgsl_code.to_string(),
        },
    );
    node.inputs = inputs;
    node.outputs = outputs;
    node
}

/// Surface output, the root every other node feeds
pub fn output() -> ShaderNode {
    ShaderNode::new("SurfaceOutput", NodeOperation::Output)
        .with_input(Port::new("Albedo", DataType::Vec3).with_default(ShaderValue::Vec3([0.5; 3])))
        .with_input(
            Port::new("Normal", DataType::Vec3).with_default(ShaderValue::Vec3([0.0, 0.0, 1.0])),
        )
        .with_input(Port::new("Metallic", DataType::Float).with_default(0.0))
        .with_input(Port::new("Roughness", DataType::Float).with_default(0.5))
        .with_input(Port::new("Emission", DataType::Vec3).with_default(ShaderValue::Vec3([0.0; 3])))
        .with_input(Port::new("Alpha", DataType::Float).with_default(1.0))
        .with_input(Port::new("AO", DataType::Float).with_default(1.0))
}
