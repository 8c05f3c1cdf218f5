use std::{
    fmt,
    io::{self, BufReader, Read},
};

use bytemuck::Zeroable;
use num_traits::FromPrimitive;

use crate::error::{BspError, FormatError};

use super::{
    consts::{LumpType, HEADER_LUMPS, IBSP_IDENT, IBSP_VERSION},
    lump::BSPLump,
};

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BSPHeader {
    pub ident: [u8; 4],                 // BSP file identifier
    pub version: u32,                   // BSP file version
    pub lumps: [BSPLump; HEADER_LUMPS], // lump directory array
}

impl Default for BSPHeader {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for BSPHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ident = self.ident;
        let version = self.version;
        f.debug_struct("BSPHeader")
            .field("ident", &String::from_utf8_lossy(&ident))
            .field("version", &version)
            .finish()
    }
}

impl BSPHeader {
    pub fn read<R: Read>(buffer: &mut BufReader<R>) -> Result<Self, BspError> {
        let mut header = Self::zeroed();
        buffer
            .read_exact(bytemuck::bytes_of_mut(&mut header))
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => FormatError::Truncated("header").into(),
                _ => BspError::Io(e),
            })?;
        Ok(header)
    }

    /// Iterates the directory in slot order.
    pub fn lump_headers(&self) -> impl Iterator<Item = (LumpType, BSPLump)> + '_ {
        (0..HEADER_LUMPS).filter_map(move |i| Some((LumpType::from_usize(i)?, self.lumps[i])))
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        let (ident, version) = (self.ident, self.version);
        if ident != IBSP_IDENT {
            return Err(FormatError::Magic {
                expected: IBSP_IDENT,
                found: ident,
            });
        }
        if version != IBSP_VERSION {
            return Err(FormatError::Version {
                expected: IBSP_VERSION,
                found: version,
            });
        }
        log::debug!("{self:?}");
        Ok(())
    }
}
