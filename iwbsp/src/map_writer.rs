use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use common::vfile::VFile;
use glam::DVec3;

use crate::{
    entities::Entity,
    error::BspError,
    level::LevelData,
    reconstruct::{
        brush::MapBrush,
        patch::{Patch, PatchTriangle},
        portal::{PORTAL_MATERIAL, PORTAL_NODRAW_MATERIAL},
        reconstruct, ReconstructedGeometry,
    },
};

pub const MAP_HEADER: &str = "iwmap 4";
pub const LIGHTMAP_MATERIAL: &str = "lightmap_gray";

/// Length of the in-plane vectors used to pick the two extra points of a face.
const FACE_POINT_SPREAD: f64 = 100.0;

/// Decides which brush materials mark a brush as a portal.
#[derive(Clone, Debug)]
pub struct PortalMaterialFilter {
    names: Vec<String>,
}

impl Default for PortalMaterialFilter {
    fn default() -> Self {
        Self::new([PORTAL_MATERIAL, PORTAL_NODRAW_MATERIAL])
    }
}

impl PortalMaterialFilter {
    /// Directory prefixes of `names` are dropped, like those of the materials tested.
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|n| base_name(n.as_ref()).to_owned())
                .collect(),
        }
    }

    /// Case-insensitive, ignoring any directory prefix of `material`.
    pub fn matches(&self, material: &str) -> bool {
        let name = base_name(material);
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

fn base_name(material: &str) -> &str {
    material.rsplit(['/', '\\']).next().unwrap_or(material)
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub exclude_patches: bool,
    /// Replace the level's own portal brushes with the merged portals.
    pub prefer_portal_brushes: bool,
    /// Write the brushes of `"model" "*N"` entities inside those entities instead of the world.
    pub entity_brushes: bool,
    pub portal_materials: PortalMaterialFilter,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            exclude_patches: false,
            prefer_portal_brushes: true,
            entity_brushes: true,
            portal_materials: PortalMaterialFilter::default(),
        }
    }
}

/// Writes the whole map. Everything is written in reconstruction order, so the same input
/// always gives the same text.
pub fn export_map<W: Write>(
    geometry: &ReconstructedGeometry,
    options: &ExportOptions,
    out: &mut W,
) -> io::Result<()> {
    MapWriter {
        out,
        options,
        geometry,
    }
    .write()
}

/// Loads `input`, reconstructs it and writes the map to `output`.
///
/// The output file is only created once the container has been fully validated.
pub fn export_file(input: &Path, output: &Path, options: &ExportOptions) -> Result<(), BspError> {
    let file = VFile::open(input)?;
    let level = LevelData::from_vfile(&file)?;
    let geometry = reconstruct(&level);

    log::info!("Exporting to {:?}", output);
    let mut out = BufWriter::new(File::create(output)?);
    export_map(&geometry, options, &mut out)?;
    out.flush()?;
    Ok(())
}

struct MapWriter<'a, W: Write> {
    out: &'a mut W,
    options: &'a ExportOptions,
    geometry: &'a ReconstructedGeometry,
}

impl<'a, W: Write> MapWriter<'a, W> {
    fn write(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", MAP_HEADER)?;

        self.write_world()?;

        let mut written = 1;
        for entity in self.geometry.entities.iter().skip(1) {
            self.write_entity(written, entity)?;
            written += 1;
        }
        Ok(())
    }

    fn write_world(&mut self) -> io::Result<()> {
        writeln!(self.out, "// entity 0\n{{")?;
        match self.geometry.entities.first() {
            Some(world) => self.write_pairs(world, false)?,
            None => writeln!(self.out, "\"classname\" \"worldspawn\"")?,
        }

        let owned = self.entity_owned();
        let mut brush_num = 0;
        for (brush, _) in self.geometry.brushes.iter().zip(owned).filter(|(_, o)| !o) {
            if self.write_brush(brush_num, brush, DVec3::ZERO)? {
                brush_num += 1;
            }
        }

        if self.options.prefer_portal_brushes {
            for brush in &self.geometry.portals {
                self.write_faces(brush_num, brush, DVec3::ZERO)?;
                brush_num += 1;
            }
        }

        if !self.options.exclude_patches {
            for (i, patch) in self.geometry.patches.iter().enumerate() {
                self.write_patch(i, patch)?;
            }
        }

        writeln!(self.out, "}}")
    }

    /// Model whose brushes are written inside `entity` instead of the world.
    fn entity_model(&self, entity: &Entity) -> Option<usize> {
        if !self.options.entity_brushes {
            return None;
        }
        entity
            .brush_model()
            .filter(|&model| model != 0 && model < self.geometry.models.len())
    }

    /// Per brush, whether some entity writes it.
    fn entity_owned(&self) -> Vec<bool> {
        let mut owned = vec![false; self.geometry.brushes.len()];
        for entity in self.geometry.entities.iter().skip(1) {
            if let Some(model) = self.entity_model(entity) {
                owned[self.geometry.models[model].clone()].fill(true);
            }
        }
        owned
    }

    fn write_entity(&mut self, index: usize, entity: &Entity) -> io::Result<()> {
        if let Some(model) = entity.brush_model() {
            if self.options.entity_brushes && model >= self.geometry.models.len() {
                log::warn!("Entity {} references missing model *{}", index, model);
            }
        }
        let brushes = self
            .entity_model(entity)
            .and_then(|model| self.geometry.model_brushes(model));

        writeln!(self.out, "// entity {}\n{{", index)?;
        self.write_pairs(entity, brushes.is_some())?;

        if let Some(brushes) = brushes {
            let origin = entity.origin();
            let mut brush_num = 0;
            for brush in brushes {
                if self.write_brush(brush_num, brush, origin)? {
                    brush_num += 1;
                }
            }
        }

        writeln!(self.out, "}}")
    }

    fn write_pairs(&mut self, entity: &Entity, skip_model: bool) -> io::Result<()> {
        for (key, value) in &entity.pairs {
            if skip_model && key == "model" {
                continue;
            }
            writeln!(self.out, "\"{}\" \"{}\"", key, value)?;
        }
        Ok(())
    }

    /// Writes a level brush unless it is empty or replaced by merged portals.
    fn write_brush(&mut self, num: usize, brush: &MapBrush, origin: DVec3) -> io::Result<bool> {
        if brush.is_empty() {
            return Ok(false);
        }
        if self.options.prefer_portal_brushes
            && self.options.portal_materials.matches(&brush.material)
        {
            return Ok(false);
        }
        self.write_faces(num, brush, origin)?;
        Ok(true)
    }

    fn write_faces(&mut self, num: usize, brush: &MapBrush, origin: DVec3) -> io::Result<()> {
        writeln!(self.out, "// brush {}\n{{", num)?;
        if brush.is_detail() {
            writeln!(self.out, "contents detail;")?;
        }
        for face in &brush.faces {
            let side = &brush.sides[face.plane];
            let [a, b, c] = face_points(side.normal, face.centroid() + origin);
            writeln!(
                self.out,
                " ( {} ) ( {} ) ( {} ) {} 128 128 0 0 0 0 {} 16384 16384 0 0 0 0",
                Xyz(a),
                Xyz(b),
                Xyz(c),
                side.material,
                LIGHTMAP_MATERIAL
            )?;
        }
        writeln!(self.out, "}}")
    }

    /// The `// patch N` comment is the only trace of the grouping, every triangle becomes a
    /// mesh record of its own.
    fn write_patch(&mut self, num: usize, patch: &Patch) -> io::Result<()> {
        writeln!(self.out, "// patch {}", num)?;
        for triangle in &patch.triangles {
            self.write_mesh(&patch.material, triangle)?;
        }
        Ok(())
    }

    // A 2x2 grid with the last corner collapsed onto the third vertex.
    fn write_mesh(&mut self, material: &str, triangle: &PatchTriangle) -> io::Result<()> {
        let [a, b, c] = triangle.positions;
        writeln!(self.out, "{{\nmesh\n{{\n{}\n{}\n2 2 16 8", material, LIGHTMAP_MATERIAL)?;
        for (row, points) in [[a, b], [c, c]].iter().enumerate() {
            writeln!(self.out, "(")?;
            for (col, p) in points.iter().enumerate() {
                let (s, t) = (col as f64, row as f64);
                writeln!(
                    self.out,
                    "v {} t {:.6} {:.6} {:.6} {:.6}",
                    Xyz(*p),
                    s * 1024.0,
                    t * 1024.0,
                    s * 16.0,
                    t * 16.0
                )?;
            }
            writeln!(self.out, ")")?;
        }
        writeln!(self.out, "}}\n}}")
    }
}

/// Three points on the plane through `anchor` facing away from `normal`, wound the way the
/// map format expects for a half-space whose inside is behind `normal`.
pub fn face_points(normal: DVec3, anchor: DVec3) -> [DVec3; 3] {
    let n = -normal;
    let tangent = if n.dot(DVec3::Z).abs() < 0.01 {
        n.cross(DVec3::Z)
    } else {
        n.cross(DVec3::Y)
    };
    let bitangent = n.cross(tangent);
    [
        anchor,
        anchor + tangent * FACE_POINT_SPREAD,
        anchor + bitangent * FACE_POINT_SPREAD,
    ]
}

struct Xyz(DVec3);

impl std::fmt::Display for Xyz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6} {:.6} {:.6}", self.0.x, self.0.y, self.0.z)
    }
}
