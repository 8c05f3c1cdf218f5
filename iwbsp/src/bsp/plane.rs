use glam::Vec3;

use super::{consts::LumpType, Lump};

/// The set of points `p` with `normal . p - dist <= 0` lies behind the plane, inside a brush.
#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPPlane {
    pub normal: Vec3, // normal vector
    pub dist: f32,    // distance from origin
}

impl Lump for BSPPlane {
    fn lump_type() -> LumpType {
        LumpType::Planes
    }
}
