//! Synthetic containers for tests.

use std::{
    io::{BufReader, Cursor},
    mem,
};

use bytemuck::Zeroable;
use glam::Vec3;

use crate::{
    bsp::{
        brush::BSPBrushSide,
        consts::{IBSP_IDENT, IBSP_VERSION},
        header::BSPHeader,
        material::BSPMaterial,
        LumpType,
    },
    error::BspError,
    level::LevelData,
    reconstruct::brush::{axial_bits, AXIAL_SLOTS, AxialSign},
};

pub struct ContainerBuilder {
    ident: [u8; 4],
    version: u32,
    lumps: Vec<(LumpType, Vec<u8>)>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            ident: IBSP_IDENT,
            version: IBSP_VERSION,
            lumps: Vec::new(),
        }
    }

    pub fn ident(mut self, ident: [u8; 4]) -> Self {
        self.ident = ident;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn lump<T: bytemuck::NoUninit>(self, lump: LumpType, records: &[T]) -> Self {
        self.raw(lump, bytemuck::cast_slice(records))
    }

    pub fn raw(mut self, lump: LumpType, bytes: &[u8]) -> Self {
        self.lumps.retain(|(l, _)| *l != lump);
        self.lumps.push((lump, bytes.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut header = BSPHeader::zeroed();
        header.ident = self.ident;
        header.version = self.version;

        let mut data = vec![0; mem::size_of::<BSPHeader>()];
        for (lump, bytes) in &self.lumps {
            header.lumps[*lump as usize].file_ofs = data.len() as u32;
            header.lumps[*lump as usize].file_len = bytes.len() as u32;
            data.extend_from_slice(bytes);
        }
        data[..mem::size_of::<BSPHeader>()].copy_from_slice(bytemuck::bytes_of(&header));
        data
    }

    pub fn load(&self) -> Result<LevelData, BspError> {
        LevelData::load(&mut BufReader::new(Cursor::new(self.build())))
    }
}

pub fn material(name: &str, content_flags: u32) -> BSPMaterial {
    let mut material = BSPMaterial::zeroed();
    material.material[..name.len()].copy_from_slice(name.as_bytes());
    material.content_flags = content_flags;
    material
}

/// The six implicit sides of a box brush.
pub fn axial_sides(mins: Vec3, maxs: Vec3, material_num: i32) -> [BSPBrushSide; 6] {
    AXIAL_SLOTS.map(|slot| BSPBrushSide {
        plane: axial_bits(match slot.sign {
            AxialSign::Min => mins[slot.axis],
            AxialSign::Max => maxs[slot.axis],
        }),
        material_num,
    })
}
