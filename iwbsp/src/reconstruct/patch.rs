use ahash::{AHashMap, AHashSet};
use glam::DVec3;

use crate::{
    bsp::collision::{
        AabbTreeChildren, BSPCollisionAabbTree, BSPCollisionPartition, BSPCollisionTriangle,
        BSPCollisionVertex,
    },
    level::LevelData,
};

/// Triangles per patch before a new one is opened.
pub const PATCH_TRIANGLE_LIMIT: usize = 7;
/// Collision vertices this close to the origin are unused slots, not geometry.
pub const SENTINEL_EPSILON: f64 = 0.0001;

#[derive(Clone, Debug, PartialEq)]
pub struct PatchTriangle {
    /// Collision vertex indices, in stored winding order.
    pub indices: [u32; 3],
    pub positions: [DVec3; 3],
}

impl PatchTriangle {
    fn sorted_indices(&self) -> [u32; 3] {
        let mut indices = self.indices;
        indices.sort_unstable();
        indices
    }
}

#[derive(Clone, Debug)]
pub struct Patch {
    pub material: String,
    pub triangles: Vec<PatchTriangle>,
}

impl Patch {
    fn is_full(&self) -> bool {
        self.triangles.len() >= PATCH_TRIANGLE_LIMIT
    }
}

/// Groups the triangles referenced by collision tree leaves into patches of at most
/// [`PATCH_TRIANGLE_LIMIT`] triangles sharing a material.
pub fn extract_patches(level: &LevelData) -> Vec<Patch> {
    let partitions = level.lump::<BSPCollisionPartition>();
    let triangles = level.lump::<BSPCollisionTriangle>();
    let verts = level.lump::<BSPCollisionVertex>();

    let mut patches: Vec<Patch> = Vec::new();
    // patch currently being filled, per material
    let mut open: AHashMap<String, usize> = AHashMap::new();
    let mut seen: AHashSet<[u32; 3]> = AHashSet::new();

    let mut skipped_sentinel = 0;
    let mut skipped_duplicate = 0;

    for (node_index, node) in level.lump::<BSPCollisionAabbTree>().iter().enumerate() {
        let partition_index = match node.children() {
            Some(AabbTreeChildren::Leaf { partition }) => partition,
            Some(AabbTreeChildren::Interior { .. }) => continue,
            None => {
                log::warn!("Collision node {} has a negative index or child count", node_index);
                continue;
            }
        };
        let Some(partition) = partitions.get(partition_index) else {
            log::warn!(
                "Collision node {} references missing partition {}",
                node_index,
                partition_index
            );
            continue;
        };
        let Some(leaf_triangles) = triangles.get(partition.triangles()) else {
            log::warn!("Partition {} triangles run past the lump", partition_index);
            continue;
        };

        let material = level.material_name(node.material_index as i64);

        for (t, tri) in leaf_triangles.iter().enumerate() {
            let Some(triangle) = resolve_triangle(tri, verts) else {
                log::warn!(
                    "Triangle {} of partition {} references a missing vertex",
                    partition.triangles().start + t,
                    partition_index
                );
                continue;
            };

            if triangle
                .positions
                .iter()
                .any(|p| p.length() < SENTINEL_EPSILON)
            {
                skipped_sentinel += 1;
                continue;
            }
            if !seen.insert(triangle.sorted_indices()) {
                skipped_duplicate += 1;
                continue;
            }

            let patch_index = match open.get(&material) {
                Some(&i) if !patches[i].is_full() => i,
                _ => {
                    patches.push(Patch {
                        material: material.clone(),
                        triangles: Vec::with_capacity(PATCH_TRIANGLE_LIMIT),
                    });
                    open.insert(material.clone(), patches.len() - 1);
                    patches.len() - 1
                }
            };
            patches[patch_index].triangles.push(triangle);
        }
    }

    log::debug!(
        "Extracted {} patches ({} sentinel, {} duplicate triangles skipped)",
        patches.len(),
        skipped_sentinel,
        skipped_duplicate
    );
    patches
}

fn resolve_triangle(
    tri: &BSPCollisionTriangle,
    verts: &[BSPCollisionVertex],
) -> Option<PatchTriangle> {
    let indices = tri.vert_indices;
    let mut positions = [DVec3::ZERO; 3];
    for (position, &index) in positions.iter_mut().zip(&indices) {
        let xyz = verts.get(index as usize)?.xyz;
        *position = xyz.as_dvec3();
    }
    Some(PatchTriangle { indices, positions })
}
