use std::io;

use thiserror::Error;

/// The container is not something we can reconstruct. Nothing is written when this happens.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("magic mismatch: expected {expected:?}, found {found:?}")]
    Magic { expected: [u8; 4], found: [u8; 4] },
    #[error("version mismatch: expected {expected}, found {found}")]
    Version { expected: u32, found: u32 },
    #[error("lump `{lump}` is {len} bytes, not a multiple of its {element_size} byte records")]
    LumpSize {
        lump: &'static str,
        len: u32,
        element_size: usize,
    },
    #[error("unexpected end of data while reading {0}")]
    Truncated(&'static str),
    #[error("no support for parsing brushes in entity text (line {line})")]
    BrushInEntities { line: usize },
    #[error("unbalanced `{brace}` in entity text (line {line})")]
    UnbalancedBrace { brace: char, line: usize },
}

#[derive(Debug, Error)]
pub enum BspError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
