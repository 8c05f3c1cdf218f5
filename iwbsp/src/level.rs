use std::io::{self, BufReader, Read, Seek};

use common::vfile::VFile;

use crate::{
    bsp::{consts::HEADER_LUMPS, header::BSPHeader, material::BSPMaterial, Lump, LumpType},
    entities::{parse_entities, Entity},
    error::BspError,
};

/// Material written for sides that reference a material we don't have.
pub const FALLBACK_MATERIAL: &str = "caulk";

/// The bytes of one lump, copied out of the container.
pub struct LumpData {
    pub lump_type: LumpType,
    /// `None` when the record size is unknown.
    pub count: Option<usize>,
    pub bytes: Box<[u8]>,
}

#[derive(Debug, Clone)]
pub struct LumpStats {
    pub name: &'static str,
    pub element_size: usize,
    pub count: Option<usize>,
    pub len: usize,
    /// Share of the container, 0..=100.
    pub percent: f32,
}

/// Everything read from a container. Immutable once loaded; every pass borrows it.
pub struct LevelData {
    header: BSPHeader,
    file_len: u64,
    lumps: Vec<LumpData>,
    entities: Vec<Entity>,
}

impl LevelData {
    /// Reads and validates the whole container, entity text included, before returning.
    pub fn load<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Self, BspError> {
        let file_len = buffer.seek(io::SeekFrom::End(0))?;
        buffer.seek(io::SeekFrom::Start(0))?;

        let header = BSPHeader::read(buffer)?;
        header.validate()?;

        let mut lumps = Vec::with_capacity(HEADER_LUMPS);
        for (lump_type, lump) in header.lump_headers() {
            let count = lump.element_count(lump_type)?;
            let bytes = lump.read_bytes(lump_type, buffer, file_len)?;
            lumps.push(LumpData {
                lump_type,
                count,
                bytes,
            });
        }

        let entities = parse_entities(&lumps[LumpType::Entities as usize].bytes)?;

        log::info!(
            "Loaded {} bytes: {} brushes, {} portals, {} entities",
            file_len,
            lumps[LumpType::Brushes as usize].count.unwrap_or(0),
            lumps[LumpType::Portals as usize].count.unwrap_or(0),
            entities.len()
        );

        Ok(Self {
            header,
            file_len,
            lumps,
            entities,
        })
    }

    pub fn from_vfile(file: &VFile) -> Result<Self, BspError> {
        Self::load(&mut file.reader())
    }

    pub fn header(&self) -> &BSPHeader {
        &self.header
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    pub fn raw(&self, lump: LumpType) -> &[u8] {
        &self.lumps[lump as usize].bytes
    }

    /// Records of the lump `T` lives in.
    pub fn lump<T: Lump>(&self) -> &[T] {
        // records are packed, so any byte slice of the right length is aligned
        bytemuck::cast_slice(self.raw(T::lump_type()))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn material(&self, index: i64) -> Option<&BSPMaterial> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.lump::<BSPMaterial>().get(i))
    }

    pub fn material_name(&self, index: i64) -> String {
        match self.material(index) {
            Some(material) => material.name(),
            None => {
                log::warn!("Material {} is out of range", index);
                FALLBACK_MATERIAL.to_owned()
            }
        }
    }

    pub fn stats(&self, lump: LumpType) -> LumpStats {
        let data = &self.lumps[lump as usize];
        let len = data.bytes.len();
        LumpStats {
            name: lump.name(),
            element_size: lump.element_size(),
            count: data.count,
            len,
            percent: if self.file_len == 0 {
                0.0
            } else {
                len as f32 / self.file_len as f32 * 100.0
            },
        }
    }
}
