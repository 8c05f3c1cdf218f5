use flagset::flags;
use num_derive::FromPrimitive;

pub const HEADER_LUMPS: usize = 39;

/// Little-endian container tag. Anything else is not a level we understand.
pub const IBSP_IDENT: [u8; 4] = *b"IBSP";
pub const IBSP_VERSION: u32 = 4;

pub const MATERIAL_NAME_LENGTH: usize = 64;

// 3 RGBA planes of 512*512 and a 1024*1024 shadow map.
pub const LIGHTMAP_SIZE: usize = 512 * 512 * 4 * 3 + 1024 * 1024;

#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq, Hash)]
pub enum LumpType {
    Materials = 0,
    LightBytes = 1,
    LightGridEntries = 2,
    LightGridColors = 3,
    Planes = 4,
    BrushSides = 5,
    Brushes = 6,
    Triangles = 7,
    DrawVerts = 8,
    DrawIndices = 9,
    CullGroups = 10,
    CullGroupIndices = 11,
    Obsolete1 = 12,
    Obsolete2 = 13,
    Obsolete3 = 14,
    Obsolete4 = 15,
    Obsolete5 = 16,
    PortalVerts = 17,
    Occluders = 18,
    OccluderPlanes = 19,
    OccluderEdges = 20,
    OccluderIndices = 21,
    AabbTrees = 22,
    Cells = 23,
    Portals = 24,
    Nodes = 25,
    Leafs = 26,
    LeafBrushes = 27,
    LeafSurfaces = 28,
    CollisionVerts = 29,
    CollisionEdges = 30,
    CollisionTris = 31,
    CollisionBorders = 32,
    CollisionPartitions = 33,
    CollisionAabbs = 34,
    Models = 35,
    Visibility = 36,
    Entities = 37,
    PathConnections = 38,
}

impl LumpType {
    /// Name used by the compiler tools when listing lumps.
    pub fn name(self) -> &'static str {
        match self {
            LumpType::Materials => "materials",
            LumpType::LightBytes => "lightmaps",
            LumpType::LightGridEntries => "light grid hash",
            LumpType::LightGridColors => "light grid values",
            LumpType::Planes => "planes",
            LumpType::BrushSides => "brushsides",
            LumpType::Brushes => "brushes",
            LumpType::Triangles => "trianglesoups",
            LumpType::DrawVerts => "drawverts",
            LumpType::DrawIndices => "drawindexes",
            LumpType::CullGroups => "cullgroups",
            LumpType::CullGroupIndices => "cullgroupindexes",
            LumpType::Obsolete1 => "shadowverts",
            LumpType::Obsolete2 => "shadowindices",
            LumpType::Obsolete3 => "shadowclusters",
            LumpType::Obsolete4 => "shadowaabbtrees",
            LumpType::Obsolete5 => "shadowsources",
            LumpType::PortalVerts => "portalverts",
            LumpType::Occluders => "occluders",
            LumpType::OccluderPlanes => "occluderplanes",
            LumpType::OccluderEdges => "occluderedges",
            LumpType::OccluderIndices => "occluderindexes",
            LumpType::AabbTrees => "aabbtrees",
            LumpType::Cells => "cells",
            LumpType::Portals => "portals",
            LumpType::Nodes => "nodes",
            LumpType::Leafs => "leafs",
            LumpType::LeafBrushes => "leafbrushes",
            LumpType::LeafSurfaces => "leafsurfaces",
            LumpType::CollisionVerts => "collisionverts",
            LumpType::CollisionEdges => "collisionedges",
            LumpType::CollisionTris => "collisiontris",
            LumpType::CollisionBorders => "collisionborders",
            LumpType::CollisionPartitions => "collisionparts",
            LumpType::CollisionAabbs => "collisionaabbs",
            LumpType::Models => "models",
            LumpType::Visibility => "visibility",
            LumpType::Entities => "entdata",
            LumpType::PathConnections => "paths",
        }
    }

    /// Size of one record of this lump.
    ///
    /// `0` means the layout is unknown or variable and the lump is kept as raw bytes,
    /// `1` means the lump is a plain byte blob.
    pub fn element_size(self) -> usize {
        match self {
            LumpType::Materials => 72,
            LumpType::LightBytes => LIGHTMAP_SIZE,
            LumpType::Planes => 16,
            LumpType::BrushSides => 8,
            LumpType::Brushes => 4,
            LumpType::Triangles => 16,
            LumpType::DrawVerts => 68,
            LumpType::DrawIndices => 2,
            LumpType::CullGroups => 32,
            LumpType::PortalVerts => 12,
            LumpType::AabbTrees => 12,
            LumpType::Cells => 52,
            LumpType::Portals => 16,
            LumpType::Nodes => 36,
            LumpType::Leafs => 36,
            LumpType::LeafBrushes => 4,
            LumpType::LeafSurfaces => 4,
            LumpType::CollisionVerts => 16,
            LumpType::CollisionEdges => 56,
            LumpType::CollisionTris => 72,
            LumpType::CollisionBorders => 28,
            LumpType::CollisionPartitions => 12,
            LumpType::CollisionAabbs => 32,
            LumpType::Models => 48,
            LumpType::Visibility | LumpType::Entities => 1,
            LumpType::LightGridEntries
            | LumpType::LightGridColors
            | LumpType::CullGroupIndices
            | LumpType::Obsolete1
            | LumpType::Obsolete2
            | LumpType::Obsolete3
            | LumpType::Obsolete4
            | LumpType::Obsolete5
            | LumpType::Occluders
            | LumpType::OccluderPlanes
            | LumpType::OccluderEdges
            | LumpType::OccluderIndices
            | LumpType::PathConnections => 0,
        }
    }
}

flags! {
    pub enum Contents: u32 {
        Solid = 0x1,
        Foliage = 0x2,
        NonColliding = 0x4,
        Glass = 0x10,
        Water = 0x20,
        CanShootClip = 0x40,
        MissileClip = 0x80,
        Item = 0x100,
        VehicleClip = 0x200,
        ItemClip = 0x400,
        Sky = 0x800,
        AiNoSight = 0x1000,
        ClipShot = 0x2000,
        Mover = 0x4000,
        PlayerClip = 0x10000,
        MonsterClip = 0x20000,
        Teleporter = 0x40000,
        JumpPad = 0x80000,
        ClusterPortal = 0x100000,
        DoNotEnter = 0x200000,
        DoNotEnterLarge = 0x400000,
        Mantle = 0x1000000,
        Detail = 0x8000000, // brushes to be added after vis leafs
        Structural = 0x10000000,
        Transparent = 0x20000000,
        NoDrop = 0x80000000,
    }
}
