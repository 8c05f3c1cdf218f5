use glam::Vec3;

use super::{consts::LumpType, Lump};

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPCollisionVertex {
    pub check_stamp: i32,
    pub xyz: Vec3,
}

impl Lump for BSPCollisionVertex {
    fn lump_type() -> LumpType {
        LumpType::CollisionVerts
    }
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPCollisionTriangle {
    pub plane: [f32; 4],
    pub svec: [f32; 4],
    pub tvec: [f32; 4],
    pub vert_indices: [u32; 3],
    pub edge_indices: [u32; 3],
}

impl Lump for BSPCollisionTriangle {
    fn lump_type() -> LumpType {
        LumpType::CollisionTris
    }
}

/// A contiguous run of collision triangles referenced by one leaf of the aabb tree.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPCollisionPartition {
    pub check_stamp: u16,
    pub tri_count: u8,
    pub border_count: u8,
    pub first_tri_index: u32,
    pub first_border_index: u32,
}

impl BSPCollisionPartition {
    pub fn triangles(&self) -> std::ops::Range<usize> {
        let first = self.first_tri_index as usize;
        first..first + self.tri_count as usize
    }
}

impl Lump for BSPCollisionPartition {
    fn lump_type() -> LumpType {
        LumpType::CollisionPartitions
    }
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPCollisionAabbTree {
    pub origin: Vec3,
    pub half_size: Vec3,
    pub material_index: i16,
    pub child_count: i16,
    // first child when child_count > 0, partition otherwise
    index: i32,
}

/// What the index of a tree node refers to, decided by its child count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AabbTreeChildren {
    Leaf { partition: usize },
    Interior { first_child: usize, count: usize },
}

impl BSPCollisionAabbTree {
    pub fn new_leaf(material_index: i16, partition: i32) -> Self {
        Self {
            origin: Vec3::ZERO,
            half_size: Vec3::ZERO,
            material_index,
            child_count: 0,
            index: partition,
        }
    }

    /// `None` for negative indices and child counts, which no valid tree contains.
    pub fn children(&self) -> Option<AabbTreeChildren> {
        let (index, child_count) = (self.index, self.child_count);
        let index = usize::try_from(index).ok()?;
        match child_count {
            0 => Some(AabbTreeChildren::Leaf { partition: index }),
            c if c > 0 => Some(AabbTreeChildren::Interior {
                first_child: index,
                count: c as usize,
            }),
            _ => None,
        }
    }
}

impl Lump for BSPCollisionAabbTree {
    fn lump_type() -> LumpType {
        LumpType::CollisionAabbs
    }
}
