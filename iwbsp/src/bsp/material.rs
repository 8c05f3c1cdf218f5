use flagset::FlagSet;

use super::{
    consts::{Contents, LumpType, MATERIAL_NAME_LENGTH},
    Lump,
};

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPMaterial {
    pub material: [u8; MATERIAL_NAME_LENGTH], // NUL padded
    pub surface_flags: u32,
    pub content_flags: u32,
}

impl BSPMaterial {
    pub fn name(&self) -> String {
        let material = self.material;
        let end = material.iter().position(|&c| c == 0).unwrap_or(material.len());
        String::from_utf8_lossy(&material[..end]).into_owned()
    }

    pub fn contents(&self) -> FlagSet<Contents> {
        FlagSet::new_truncated(self.content_flags)
    }
}

impl Lump for BSPMaterial {
    fn lump_type() -> LumpType {
        LumpType::Materials
    }
}
