use std::io::{self, BufReader, Read, Seek};

use crate::error::{BspError, FormatError};

use super::consts::LumpType;

/// A fixed-size record that lives in exactly one lump slot.
///
/// Records are `#[repr(C, packed)]` so a lump's bytes can be viewed as `[Self]` directly.
pub trait Lump: bytemuck::Pod {
    fn lump_type() -> LumpType;
}

// Directory entry, in the order the slots are enumerated.
#[repr(C, packed)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPLump {
    pub file_len: u32, // length of lump (bytes)
    pub file_ofs: u32, // offset into file (bytes)
}

impl BSPLump {
    /// Number of records in the lump, or `None` when the record size is unknown.
    pub fn element_count(&self, lump: LumpType) -> Result<Option<usize>, FormatError> {
        let len = self.file_len as usize;
        match lump.element_size() {
            0 => Ok(None),
            size if len % size != 0 => Err(FormatError::LumpSize {
                lump: lump.name(),
                len: self.file_len,
                element_size: size,
            }),
            size => Ok(Some(len / size)),
        }
    }

    /// Copies the lump out of the container. `total_len` is the size of the whole container.
    pub fn read_bytes<R: Read + Seek>(
        &self,
        lump: LumpType,
        buffer: &mut BufReader<R>,
        total_len: u64,
    ) -> Result<Box<[u8]>, BspError> {
        let (ofs, len) = (self.file_ofs as u64, self.file_len as u64);
        if ofs + len > total_len {
            return Err(FormatError::Truncated(lump.name()).into());
        }

        let mut bytes = bytemuck::zeroed_slice_box(len as usize);
        if len > 0 {
            buffer.seek(io::SeekFrom::Start(ofs))?;
            buffer.read_exact(&mut bytes).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => FormatError::Truncated(lump.name()).into(),
                _ => BspError::Io(e),
            })?;
        }
        Ok(bytes)
    }
}
