use flagset::FlagSet;
use glam::{DMat3, DVec3};

use crate::{
    bsp::{
        brush::{BSPBrush, BSPBrushSide},
        consts::Contents,
        plane::BSPPlane,
    },
    level::LevelData,
};

/// How far outside a half-space a vertex may lie and still belong to the brush.
pub const PLANE_EPSILON: f64 = 0.008;
/// Points of a face closer than this are the same point.
pub const POINT_EPSILON: f64 = 0.001;
/// Three planes whose normals span less than this don't meet in a point.
pub const DETERMINANT_EPSILON: f64 = 1e-6;

pub const AXIAL_SIDES: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxialSign {
    Min,
    Max,
}

#[derive(Copy, Clone, Debug)]
pub struct AxialSlot {
    pub axis: usize,
    pub sign: AxialSign,
}

/// Order of the implicit axis aligned sides at the start of every brush.
pub const AXIAL_SLOTS: [AxialSlot; AXIAL_SIDES] = [
    AxialSlot { axis: 0, sign: AxialSign::Min },
    AxialSlot { axis: 0, sign: AxialSign::Max },
    AxialSlot { axis: 1, sign: AxialSign::Min },
    AxialSlot { axis: 1, sign: AxialSign::Max },
    AxialSlot { axis: 2, sign: AxialSign::Min },
    AxialSlot { axis: 2, sign: AxialSign::Max },
];

/// The plane field of an axial side holds the bits of its bound.
pub fn axial_bound(plane_bits: i32) -> f32 {
    f32::from_bits(plane_bits as u32)
}

/// Inverse of [`axial_bound`].
pub fn axial_bits(bound: f32) -> i32 {
    bound.to_bits() as i32
}

/// A plane of a brush. Points with `normal . p - dist <= 0` are inside.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfSpace {
    pub normal: DVec3,
    pub dist: f64,
    pub material: String,
}

impl HalfSpace {
    pub fn new(normal: DVec3, dist: f64, material: impl Into<String>) -> Self {
        Self {
            normal,
            dist,
            material: material.into(),
        }
    }

    pub fn from_plane(plane: &BSPPlane, material: impl Into<String>) -> Self {
        let (normal, dist) = (plane.normal, plane.dist);
        Self::new(normal.as_dvec3(), dist as f64, material)
    }

    pub fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.dist
    }
}

/// Points of a brush that lie on one of its planes.
#[derive(Clone, Debug)]
pub struct Polygon {
    /// Index into the brush's sides.
    pub plane: usize,
    /// Unordered.
    pub points: Vec<DVec3>,
}

impl Polygon {
    pub fn centroid(&self) -> DVec3 {
        self.points.iter().copied().sum::<DVec3>() / self.points.len().max(1) as f64
    }
}

#[derive(Clone, Debug)]
pub struct MapBrush {
    pub mins: DVec3,
    pub maxs: DVec3,
    pub sides: Vec<HalfSpace>,
    pub faces: Vec<Polygon>,
    /// Default material of the brush.
    pub material: String,
    pub contents: FlagSet<Contents>,
}

impl MapBrush {
    /// A box, before any explicit sides are added. `materials` follow [`AXIAL_SLOTS`].
    pub fn from_aabb(mins: DVec3, maxs: DVec3, materials: [String; AXIAL_SIDES]) -> Self {
        let sides = AXIAL_SLOTS
            .iter()
            .zip(materials)
            .map(|(slot, material)| {
                let mut normal = DVec3::ZERO;
                match slot.sign {
                    AxialSign::Min => {
                        normal[slot.axis] = -1.0;
                        HalfSpace::new(normal, -mins[slot.axis], material)
                    }
                    AxialSign::Max => {
                        normal[slot.axis] = 1.0;
                        HalfSpace::new(normal, maxs[slot.axis], material)
                    }
                }
            })
            .collect();

        Self {
            mins,
            maxs,
            sides,
            faces: Vec::new(),
            material: String::new(),
            contents: FlagSet::default(),
        }
    }

    pub fn from_sides(sides: Vec<HalfSpace>, material: impl Into<String>) -> Self {
        Self {
            mins: DVec3::ZERO,
            maxs: DVec3::ZERO,
            sides,
            faces: Vec::new(),
            material: material.into(),
            contents: FlagSet::default(),
        }
    }

    /// Builds the faces from the sides. Bounds are refit to the vertices when any exist.
    pub fn polygonize(&mut self) {
        self.faces = polygonize(&self.sides);
        let mut points = self.faces.iter().flat_map(|f| f.points.iter().copied());
        if let Some(first) = points.next() {
            let (mins, maxs) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
            self.mins = mins;
            self.maxs = maxs;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn is_detail(&self) -> bool {
        self.contents.contains(Contents::Detail)
    }
}

/// The point shared by three planes, if they meet in exactly one.
pub fn intersect(a: &HalfSpace, b: &HalfSpace, c: &HalfSpace) -> Option<DVec3> {
    let m = DMat3::from_cols(a.normal, b.normal, c.normal).transpose();
    if m.determinant().abs() < DETERMINANT_EPSILON {
        return None;
    }
    Some(m.inverse() * DVec3::new(a.dist, b.dist, c.dist))
}

/// Vertex enumeration: every face of the convex solid bounded by `sides`.
///
/// A side that yields fewer than three points doesn't touch the solid and gets no face.
pub fn polygonize(sides: &[HalfSpace]) -> Vec<Polygon> {
    let mut faces = Vec::new();

    for (i, p0) in sides.iter().enumerate() {
        let mut points: Vec<DVec3> = Vec::new();

        for (j, p1) in sides.iter().enumerate() {
            if j == i {
                continue;
            }
            for (k, p2) in sides.iter().enumerate().skip(j + 1) {
                if k == i {
                    continue;
                }
                let Some(v) = intersect(p0, p1, p2) else {
                    continue;
                };
                if sides.iter().any(|pm| pm.distance(v) > PLANE_EPSILON) {
                    continue;
                }
                if points.iter().any(|p| p.distance(v) < POINT_EPSILON) {
                    continue;
                }
                points.push(v);
            }
        }

        if points.len() >= 3 {
            faces.push(Polygon { plane: i, points });
        }
    }

    faces
}

/// Rebuilds every brush of the level, in lump order. Degenerate brushes stay in the list with
/// no faces so brush indices keep matching the model ranges.
pub fn build_brushes(level: &LevelData) -> Vec<MapBrush> {
    let brushes = level.lump::<BSPBrush>();
    let brush_sides = level.lump::<BSPBrushSide>();
    let planes = level.lump::<BSPPlane>();

    let mut side_offset = 0;
    let mut out = Vec::with_capacity(brushes.len());

    for (i, brush) in brushes.iter().enumerate() {
        let num_sides = brush.num_sides as usize;
        let sides = brush_sides.get(side_offset..side_offset + num_sides);
        side_offset += num_sides;

        let map_brush = match sides {
            Some(sides) if num_sides >= AXIAL_SIDES => build_brush(level, planes, brush, sides),
            Some(_) => {
                log::warn!("Brush {} has only {} sides", i, num_sides);
                None
            }
            None => {
                log::warn!("Brush {} sides run past the brush side lump", i);
                None
            }
        };

        out.push(map_brush.unwrap_or_else(|| MapBrush::from_sides(Vec::new(), "")));
    }

    log::debug!(
        "Rebuilt {} brushes, {} with faces",
        out.len(),
        out.iter().filter(|b| !b.is_empty()).count()
    );
    out
}

fn build_brush(
    level: &LevelData,
    planes: &[BSPPlane],
    brush: &BSPBrush,
    sides: &[BSPBrushSide],
) -> Option<MapBrush> {
    let (axial, explicit) = sides.split_at(AXIAL_SIDES);

    let mut mins = DVec3::ZERO;
    let mut maxs = DVec3::ZERO;
    let mut materials: [String; AXIAL_SIDES] = Default::default();
    for ((slot, side), material) in AXIAL_SLOTS.iter().zip(axial).zip(materials.iter_mut()) {
        let (plane, material_num) = (side.plane, side.material_num);
        let bound = axial_bound(plane) as f64;
        match slot.sign {
            AxialSign::Min => mins[slot.axis] = bound,
            AxialSign::Max => maxs[slot.axis] = bound,
        }
        *material = level.material_name(material_num as i64);
    }

    let mut map_brush = MapBrush::from_aabb(mins, maxs, materials);

    for side in explicit {
        let (plane, material_num) = (side.plane, side.material_num);
        let Some(plane) = usize::try_from(plane).ok().and_then(|p| planes.get(p)) else {
            log::warn!("Brush side references missing plane {}", plane);
            return None;
        };
        map_brush
            .sides
            .push(HalfSpace::from_plane(plane, level.material_name(material_num as i64)));
    }

    let material_num = brush.material_num as i64;
    map_brush.material = level.material_name(material_num);
    map_brush.contents = level
        .material(material_num)
        .map(|m| m.contents())
        .unwrap_or_default();

    map_brush.polygonize();
    Some(map_brush)
}
