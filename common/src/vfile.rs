use std::{
    fs,
    io::{self, BufReader, Cursor},
    path::Path,
};

/// A whole input held in memory, either read from disk or handed over as a buffer.
///
/// Everything downstream reads through [`VFile::reader`], so a file and an
/// in-memory container look the same to the loader.
#[derive(Default, Clone)]
pub struct VFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl VFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        match fs::read(path) {
            Ok(data) => Ok(Self {
                name: path.display().to_string(),
                data,
            }),
            Err(e) => {
                log::error!("{:?} could not be opened: {}", path, e);
                Err(e)
            }
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn reader(&self) -> BufReader<Cursor<&[u8]>> {
        BufReader::new(Cursor::new(&self.data[..]))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
