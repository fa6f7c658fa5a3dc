//! Kernel parameter types and resolved uniform values.

use std::fmt;

use crate::id::TextureUnit;

/// Semantic type of a declared kernel parameter.
///
/// This is a closed set: declarations of any other type are not part of a
/// kernel's schema, so dispatch never encounters an unknown type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `float`
    Float,
    /// `vec2`
    Vec2,
    /// `vec3`
    Vec3,
    /// `vec4`
    Vec4,
    /// `sampler2D`: a sampled field bound through a texture unit.
    Sampler2D,
}

impl ParamType {
    /// Parse a declaration type name. Returns `None` for anything outside
    /// the recognised set.
    pub fn from_glsl(name: &str) -> Option<Self> {
        match name {
            "float" => Some(Self::Float),
            "vec2" => Some(Self::Vec2),
            "vec3" => Some(Self::Vec3),
            "vec4" => Some(Self::Vec4),
            "sampler2D" => Some(Self::Sampler2D),
            _ => None,
        }
    }

    /// The declaration type name.
    pub fn glsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Sampler2D => "sampler2D",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// A parameter value as handed to the device for one invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    /// Scalar.
    Float(f32),
    /// 2-vector.
    Vec2([f32; 2]),
    /// 3-vector.
    Vec3([f32; 3]),
    /// 4-vector.
    Vec4([f32; 4]),
    /// Sampled field, bound to the given texture unit.
    Sampler(TextureUnit),
}

impl Uniform {
    /// The parameter type this value satisfies.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Float(_) => ParamType::Float,
            Self::Vec2(_) => ParamType::Vec2,
            Self::Vec3(_) => ParamType::Vec3,
            Self::Vec4(_) => ParamType::Vec4,
            Self::Sampler(_) => ParamType::Sampler2D,
        }
    }

    /// Widen a numeric value to four components, zero-padded.
    ///
    /// Returns `None` for samplers.
    pub fn as_vec4(&self) -> Option<[f32; 4]> {
        match *self {
            Self::Float(v) => Some([v, 0.0, 0.0, 0.0]),
            Self::Vec2([x, y]) => Some([x, y, 0.0, 0.0]),
            Self::Vec3([x, y, z]) => Some([x, y, z, 0.0]),
            Self::Vec4(v) => Some(v),
            Self::Sampler(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glsl_names_round_trip() {
        for ty in [
            ParamType::Float,
            ParamType::Vec2,
            ParamType::Vec3,
            ParamType::Vec4,
            ParamType::Sampler2D,
        ] {
            assert_eq!(ParamType::from_glsl(ty.glsl_name()), Some(ty));
        }
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert_eq!(ParamType::from_glsl("mat4"), None);
        assert_eq!(ParamType::from_glsl("int"), None);
        assert_eq!(ParamType::from_glsl("Sampler2D"), None);
    }

    #[test]
    fn numeric_uniforms_widen() {
        assert_eq!(Uniform::Float(2.0).as_vec4(), Some([2.0, 0.0, 0.0, 0.0]));
        assert_eq!(
            Uniform::Vec3([1.0, 2.0, 3.0]).as_vec4(),
            Some([1.0, 2.0, 3.0, 0.0])
        );
        assert_eq!(Uniform::Sampler(TextureUnit(0)).as_vec4(), None);
    }
}
