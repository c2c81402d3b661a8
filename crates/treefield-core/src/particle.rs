use glam::Vec3;

use crate::color::Color;

/// Which instanced batch a particle is drawn in.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ShapeKind {
    Cube = 0,
    Sphere = 1,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Cube, ShapeKind::Sphere];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ShapeKind::Cube),
            1 => Some(ShapeKind::Sphere),
            _ => None,
        }
    }
}

/// One particle's fixed data. Nothing here changes after generation; the
/// per-frame pose lives in [`crate::field::InstanceTransform`].
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Rest position in the tree (cone) arrangement.
    pub clustered: Vec3,
    /// Rest position in the universe (shell) arrangement.
    pub dispersed: Vec3,
    pub base_scale: f32,
    pub color: Color,
    /// XYZ Euler angles, radians.
    pub rest_rotation: Vec3,
    /// Signed spin rate used once the field is dispersed.
    pub rotation_speed: f32,
    pub shape: ShapeKind,
}
