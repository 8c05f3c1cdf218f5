pub use crate::vfile::VFile;
pub use crate::vpath::exported_map_path;
