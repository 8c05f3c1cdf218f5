use glam::DVec3;

use crate::{
    bsp::{
        plane::BSPPlane,
        portal::{BSPPortal, BSPPortalVertex},
    },
    level::LevelData,
};

use super::brush::{HalfSpace, MapBrush};

/// Two portal vertices closer than this are the same vertex.
pub const PORTAL_VERTEX_EPSILON: f64 = 0.0001;
/// Distance between the two faces of a portal brush.
pub const PORTAL_THICKNESS: f64 = 1.0;

pub const PORTAL_MATERIAL: &str = "portal";
pub const PORTAL_NODRAW_MATERIAL: &str = "portal_nodraw";

/// A portal with its vertices and plane resolved from the lumps.
#[derive(Clone, Debug)]
pub struct PortalPolygon {
    pub cell: u32,
    pub normal: DVec3,
    pub dist: f64,
    /// Winding order, as stored.
    pub points: Vec<DVec3>,
}

impl PortalPolygon {
    pub fn centroid(&self) -> DVec3 {
        self.points.iter().copied().sum::<DVec3>() / self.points.len().max(1) as f64
    }

    /// Every vertex of `self` has a counterpart in `other`.
    pub fn same_boundary(&self, other: &PortalPolygon) -> bool {
        self.points.len() == other.points.len()
            && self.points.iter().all(|p| {
                other
                    .points
                    .iter()
                    .any(|q| p.distance(*q) < PORTAL_VERTEX_EPSILON)
            })
    }

    /// A thin brush lying on the portal, with a nodraw face [`PORTAL_THICKNESS`] behind the
    /// portal face and one nodraw side per edge.
    pub fn to_brush(&self) -> MapBrush {
        let mut sides = vec![
            HalfSpace::new(self.normal, self.dist, PORTAL_MATERIAL),
            HalfSpace::new(
                -self.normal,
                -(self.dist - PORTAL_THICKNESS),
                PORTAL_NODRAW_MATERIAL,
            ),
        ];

        let centroid = self.centroid();
        for (i, &a) in self.points.iter().enumerate() {
            let b = self.points[(i + 1) % self.points.len()];
            let normal = (b - a).cross(self.normal).normalize_or_zero();
            if normal == DVec3::ZERO {
                continue;
            }
            // outward: away from the middle of the portal
            let normal = if normal.dot(centroid - a) > 0.0 {
                -normal
            } else {
                normal
            };
            sides.push(HalfSpace::new(normal, normal.dot(a), PORTAL_NODRAW_MATERIAL));
        }

        let mut brush = MapBrush::from_sides(sides, PORTAL_MATERIAL);
        brush.polygonize();
        brush
    }
}

/// Resolves every portal of the level. Malformed portals are skipped.
pub fn portal_polygons(level: &LevelData) -> Vec<PortalPolygon> {
    let planes = level.lump::<BSPPlane>();
    let verts = level.lump::<BSPPortalVertex>();

    level
        .lump::<BSPPortal>()
        .iter()
        .enumerate()
        .filter_map(|(i, portal)| {
            let (plane_index, cell) = (portal.plane_index, portal.cell_index);
            let Some(plane) = planes.get(plane_index as usize) else {
                log::warn!("Portal {} references missing plane {}", i, plane_index);
                return None;
            };
            let Some(points) = verts.get(portal.vertices()) else {
                log::warn!("Portal {} vertices run past the portal vertex lump", i);
                return None;
            };
            if points.len() < 3 {
                log::warn!("Portal {} has only {} vertices", i, points.len());
                return None;
            }
            let (normal, dist) = (plane.normal, plane.dist);
            Some(PortalPolygon {
                cell,
                normal: normal.as_dvec3(),
                dist: dist as f64,
                points: points
                    .iter()
                    .map(|v| {
                        let xyz = v.xyz;
                        xyz.as_dvec3()
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Keeps the first portal of every boundary, in order.
pub fn merge_portals(portals: &[PortalPolygon]) -> Vec<&PortalPolygon> {
    let mut accepted: Vec<&PortalPolygon> = Vec::new();
    for portal in portals {
        if accepted.iter().any(|a| portal.same_boundary(a)) {
            continue;
        }
        accepted.push(portal);
    }
    log::debug!("Merged {} portals into {}", portals.len(), accepted.len());
    accepted
}

/// One brush per boundary between cells.
pub fn build_portal_brushes(level: &LevelData) -> Vec<MapBrush> {
    let portals = portal_polygons(level);
    merge_portals(&portals)
        .into_iter()
        .map(PortalPolygon::to_brush)
        .filter(|brush| !brush.is_empty())
        .collect()
}

#[cfg(test)]
mod portal_tests {
    use glam::{DVec3, Vec3};

    use super::*;
    use crate::{
        bsp::{plane::BSPPlane, LumpType},
        reconstruct::brush::PLANE_EPSILON,
        testing::ContainerBuilder,
    };

    fn quad(cell: u32, points: [DVec3; 4]) -> PortalPolygon {
        PortalPolygon {
            cell,
            normal: DVec3::Z,
            dist: 32.0,
            points: points.to_vec(),
        }
    }

    fn square() -> [DVec3; 4] {
        [
            DVec3::new(0.0, 0.0, 32.0),
            DVec3::new(64.0, 0.0, 32.0),
            DVec3::new(64.0, 64.0, 32.0),
            DVec3::new(0.0, 64.0, 32.0),
        ]
    }

    #[test]
    fn shared_boundary_is_merged() {
        let a = quad(0, square());
        let [p0, p1, p2, p3] = square();
        let nudge = DVec3::splat(0.00003);
        let b = quad(1, [p2 + nudge, p0, p3 - nudge, p1]);

        assert!(a.same_boundary(&b));
        let portals = [a, b];
        let merged = merge_portals(&portals);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].cell, 0);
    }

    #[test]
    fn distinct_boundaries_are_kept() {
        let a = quad(0, square());
        let b = quad(1, square().map(|p| p + DVec3::new(64.0, 0.0, 0.0)));
        let c = PortalPolygon {
            points: square()[..3].to_vec(),
            ..quad(2, square())
        };
        let far = quad(3, square().map(|p| p + DVec3::splat(0.001)));

        let portals = [a, b, c, far];
        assert_eq!(merge_portals(&portals).len(), 4);
    }

    #[test]
    fn portal_brush_is_thin_box() {
        let brush = quad(0, square()).to_brush();

        assert_eq!(brush.sides.len(), 6);
        assert_eq!(brush.faces.len(), 6);
        assert_eq!(brush.sides[0].material, PORTAL_MATERIAL);
        assert_eq!(brush.sides[1].material, PORTAL_NODRAW_MATERIAL);
        assert!((brush.maxs.z - 32.0).abs() < 1e-9);
        assert!((brush.mins.z - (32.0 - PORTAL_THICKNESS)).abs() < 1e-9);
        assert!((brush.mins.x).abs() < 1e-9 && (brush.maxs.x - 64.0).abs() < 1e-9);

        for face in &brush.faces {
            assert_eq!(face.points.len(), 4);
            for p in &face.points {
                assert!(brush.sides.iter().all(|s| s.distance(*p) <= PLANE_EPSILON));
            }
        }
    }

    #[test]
    fn reversed_winding_still_outward() {
        let mut points = square();
        points.reverse();
        let brush = quad(0, points).to_brush();
        assert_eq!(brush.faces.len(), 6);
    }

    #[test]
    fn portals_from_lumps() {
        let verts: Vec<BSPPortalVertex> = square()
            .iter()
            .map(|p| BSPPortalVertex { xyz: p.as_vec3() })
            .collect();
        let level = ContainerBuilder::new()
            .lump(
                LumpType::Planes,
                &[
                    BSPPlane {
                        normal: Vec3::Z,
                        dist: 32.0,
                    },
                    BSPPlane {
                        normal: Vec3::NEG_Z,
                        dist: -32.0,
                    },
                ],
            )
            .lump(LumpType::PortalVerts, &verts)
            .lump(
                LumpType::Portals,
                &[
                    BSPPortal {
                        plane_index: 0,
                        cell_index: 0,
                        first_portal_vertex: 0,
                        portal_vertex_count: 4,
                    },
                    BSPPortal {
                        plane_index: 1,
                        cell_index: 1,
                        first_portal_vertex: 0,
                        portal_vertex_count: 4,
                    },
                    // out of range
                    BSPPortal {
                        plane_index: 0,
                        cell_index: 2,
                        first_portal_vertex: 2,
                        portal_vertex_count: 4,
                    },
                ],
            )
            .load()
            .unwrap();

        assert_eq!(portal_polygons(&level).len(), 2);
        let brushes = build_portal_brushes(&level);
        assert_eq!(brushes.len(), 1);
        assert_eq!(brushes[0].faces.len(), 6);
    }
}
