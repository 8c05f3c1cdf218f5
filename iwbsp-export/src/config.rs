use std::path::Path;

use anyhow::{Context, Result};
use ini::{Ini, Properties};
use iwbsp::map_writer::{ExportOptions, PortalMaterialFilter};

const EXPORT_SECTION: &str = "export";

/// Reads the `[export]` section of an ini file over the defaults.
pub fn load_options(path: &Path) -> Result<ExportOptions> {
    let ini = Ini::load_from_file(path).with_context(|| format!("Reading config {:?}", path))?;
    options_from_ini(&ini)
}

pub fn options_from_ini(ini: &Ini) -> Result<ExportOptions> {
    let mut options = ExportOptions::default();
    let Some(export) = ini.section(Some(EXPORT_SECTION)) else {
        log::warn!("Config has no [{}] section, using defaults", EXPORT_SECTION);
        return Ok(options);
    };

    if let Some(v) = flag(export, "exclude_patches")? {
        options.exclude_patches = v;
    }
    if let Some(v) = flag(export, "prefer_portal_brushes")? {
        options.prefer_portal_brushes = v;
    }
    if let Some(v) = flag(export, "entity_brushes")? {
        options.entity_brushes = v;
    }

    let portal_materials: Vec<&str> = export.get_all("portal_material").collect();
    if !portal_materials.is_empty() {
        options.portal_materials = PortalMaterialFilter::new(portal_materials);
    }

    Ok(options)
}

fn flag(section: &Properties, key: &str) -> Result<Option<bool>> {
    section
        .get(key)
        .map(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("[{}] {} = {:?} is not a boolean", EXPORT_SECTION, key, other),
        })
        .transpose()
}
