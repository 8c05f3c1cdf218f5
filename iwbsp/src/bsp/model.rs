use glam::Vec3;

use super::{consts::LumpType, Lump};

/// Model 0 is the world, the rest are referenced by entities as `"model" "*N"`.
#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPModel {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub first_triangle: u32,
    pub num_triangles: u32,
    pub first_surface: u32,
    pub num_surfaces: u32,
    pub first_brush: u32,
    pub num_brushes: u32,
}

impl BSPModel {
    pub fn brushes(&self) -> std::ops::Range<usize> {
        let first = self.first_brush as usize;
        first..first + self.num_brushes as usize
    }
}

impl Lump for BSPModel {
    fn lump_type() -> LumpType {
        LumpType::Models
    }
}
