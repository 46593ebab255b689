//! Path data model: vector types, easing mode and the sparse path definition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PathResult;
use crate::interp::functions::lerp_f32;

/// 2D vector; rotations store (yaw, pitch) as (x, y).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// 3D position.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(lerp_f32(self.x, other.x, t), lerp_f32(self.y, other.y, t))
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            lerp_f32(self.x, other.x, t),
            lerp_f32(self.y, other.y, t),
            lerp_f32(self.z, other.z, t),
        )
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Interpolation algorithm used to densify the control points.
/// Discriminants are the on-wire byte of the binary blob.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EasingMode {
    Linear = 0,
    Bezier = 1,
    CubicSpline = 2,
}

impl EasingMode {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Bezier => "Bezier",
            Self::CubicSpline => "CubicSpline",
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Linear),
            1 => Some(Self::Bezier),
            2 => Some(Self::CubicSpline),
            _ => None,
        }
    }
}

impl fmt::Display for EasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingMode {
    type Err = String;

    /// Case-insensitive; accepts the mode names and their byte values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "0" => Ok(Self::Linear),
            "bezier" | "1" => Ok(Self::Bezier),
            "cubicspline" | "cubic" | "2" => Ok(Self::CubicSpline),
            _ => Err("Valid easing types: Linear, Bezier, CubicSpline".to_string()),
        }
    }
}

/// Sparse path definition: everything needed to rebuild a path, nothing generated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PathDefinition {
    pub easing: EasingMode,
    /// Pre-start delay in seconds.
    #[serde(default)]
    pub delay: i32,
    pub interval: i32,
    #[serde(default)]
    pub positions: Vec<Vec3>,
    #[serde(default)]
    pub rotations: Vec<Vec2>,
}

impl PathDefinition {
    pub fn new(easing: EasingMode, interval: i32) -> Self {
        Self {
            easing,
            delay: 0,
            interval,
            positions: Vec::new(),
            rotations: Vec::new(),
        }
    }
}

/// Parse a JSON path definition.
pub fn parse_path_definition_json(s: &str) -> PathResult<PathDefinition> {
    Ok(serde_json::from_str(s)?)
}
