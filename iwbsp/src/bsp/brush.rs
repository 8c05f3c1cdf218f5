use super::{consts::LumpType, Lump};

/// Brushes own `num_sides` consecutive entries of the brush side lump, in brush order.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPBrush {
    pub num_sides: u16,
    pub material_num: u16,
}

impl Lump for BSPBrush {
    fn lump_type() -> LumpType {
        LumpType::Brushes
    }
}

/// For the first six sides of a brush `plane` is not an index, it holds the bits of an
/// `f32` axis bound. See [`crate::reconstruct::brush::AXIAL_SLOTS`].
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPBrushSide {
    pub plane: i32,
    pub material_num: i32,
}

impl Lump for BSPBrushSide {
    fn lump_type() -> LumpType {
        LumpType::BrushSides
    }
}
