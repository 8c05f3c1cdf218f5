use std::path::{Path, PathBuf};

/// `/maps/mp_foo.d3dbsp` -> `/maps/mp_foo_exported.map`
pub fn exported_map_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}_exported.map");
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
