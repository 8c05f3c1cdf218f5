use glam::Vec3;

use super::{consts::LumpType, Lump};

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPPortalVertex {
    pub xyz: Vec3,
}

impl Lump for BSPPortalVertex {
    fn lump_type() -> LumpType {
        LumpType::PortalVerts
    }
}

/// One side of a boundary between two cells. Each cell lists its own copy.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPPortal {
    pub plane_index: u32,
    pub cell_index: u32,
    pub first_portal_vertex: u32,
    pub portal_vertex_count: u32,
}

impl BSPPortal {
    pub fn vertices(&self) -> std::ops::Range<usize> {
        let first = self.first_portal_vertex as usize;
        first..first + self.portal_vertex_count as usize
    }
}

impl Lump for BSPPortal {
    fn lump_type() -> LumpType {
        LumpType::Portals
    }
}
