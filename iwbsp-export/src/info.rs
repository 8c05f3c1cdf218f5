use std::io::{self, Write};

use iwbsp::{bsp::LumpType, level::LevelData};

/// Lumps in report order. `None` separates groups.
const REPORT: &[Option<LumpType>] = &[
    Some(LumpType::Models),
    Some(LumpType::Materials),
    Some(LumpType::Brushes),
    Some(LumpType::BrushSides),
    Some(LumpType::Planes),
    Some(LumpType::Entities),
    None,
    Some(LumpType::Nodes),
    Some(LumpType::Leafs),
    Some(LumpType::LeafBrushes),
    Some(LumpType::LeafSurfaces),
    Some(LumpType::CollisionVerts),
    Some(LumpType::CollisionEdges),
    Some(LumpType::CollisionTris),
    Some(LumpType::CollisionBorders),
    Some(LumpType::CollisionPartitions),
    Some(LumpType::CollisionAabbs),
    Some(LumpType::DrawVerts),
    Some(LumpType::DrawIndices),
    Some(LumpType::Triangles),
    Some(LumpType::Obsolete1),
    Some(LumpType::Obsolete2),
    Some(LumpType::Obsolete3),
    Some(LumpType::Obsolete4),
    Some(LumpType::Obsolete5),
    Some(LumpType::LightBytes),
    Some(LumpType::LightGridEntries),
    Some(LumpType::LightGridColors),
    Some(LumpType::Visibility),
    Some(LumpType::PortalVerts),
    Some(LumpType::Occluders),
    Some(LumpType::OccluderPlanes),
    Some(LumpType::OccluderEdges),
    Some(LumpType::OccluderIndices),
    Some(LumpType::AabbTrees),
    Some(LumpType::Cells),
    Some(LumpType::Portals),
    Some(LumpType::CullGroups),
    Some(LumpType::CullGroupIndices),
    None,
    Some(LumpType::PathConnections),
];

const RULE: &str = "---------------------";

pub fn write_info<W: Write>(out: &mut W, name: &str, level: &LevelData) -> io::Result<()> {
    writeln!(out, "{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}: {}", name, level.file_len())?;

    for lump in REPORT {
        match lump {
            Some(lump) => write_lump(out, level, *lump)?,
            None => writeln!(out)?,
        }
    }

    writeln!(out, "{}", RULE)
}

fn write_lump<W: Write>(out: &mut W, level: &LevelData, lump: LumpType) -> io::Result<()> {
    let stats = level.stats(lump);
    let amount = match (stats.element_size, stats.count) {
        (1, _) => "      ".to_owned(),
        (_, Some(count)) => format!("{:6}", count),
        (_, None) => "     ?".to_owned(),
    };
    writeln!(
        out,
        "{} {:<19} {:6} B\t{:2} KB {:5.1}%",
        amount,
        stats.name,
        stats.len,
        stats.len.div_ceil(1000),
        stats.percent
    )
}
