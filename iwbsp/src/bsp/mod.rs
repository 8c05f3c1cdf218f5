pub mod brush;
pub mod collision;
pub mod consts;
pub mod header;
pub mod lump;
pub mod material;
pub mod model;
pub mod plane;
pub mod portal;

pub use consts::LumpType;
pub use lump::Lump;

// The container is a header followed by a directory of 39 (length, offset) pairs. Each slot
// holds an array of fixed size records whose layout is implied by the slot, or an opaque blob
// (entity text, visibility, light grid, paths) when the record size is unknown.
//
// Records are little-endian and tightly packed. Like every record reader here, decoding views
// the bytes in place, so a big-endian host would need byte swapping first.

#[cfg(test)]
mod bsp_tests {
    use std::mem;

    use num_traits::FromPrimitive;

    use super::{
        brush::{BSPBrush, BSPBrushSide},
        collision::{
            AabbTreeChildren, BSPCollisionAabbTree, BSPCollisionPartition, BSPCollisionTriangle,
            BSPCollisionVertex,
        },
        consts::{Contents, HEADER_LUMPS},
        header::BSPHeader,
        lump::BSPLump,
        material::BSPMaterial,
        model::BSPModel,
        plane::BSPPlane,
        portal::{BSPPortal, BSPPortalVertex},
        Lump, LumpType,
    };

    fn check_size<T: Lump>() {
        assert_eq!(
            mem::size_of::<T>(),
            T::lump_type().element_size(),
            "{}",
            T::lump_type().name()
        );
    }

    #[test]
    fn record_sizes() {
        check_size::<BSPMaterial>();
        check_size::<BSPPlane>();
        check_size::<BSPBrush>();
        check_size::<BSPBrushSide>();
        check_size::<BSPModel>();
        check_size::<BSPPortal>();
        check_size::<BSPPortalVertex>();
        check_size::<BSPCollisionVertex>();
        check_size::<BSPCollisionTriangle>();
        check_size::<BSPCollisionPartition>();
        check_size::<BSPCollisionAabbTree>();
    }

    #[test]
    fn header_layout() {
        assert_eq!(mem::size_of::<BSPLump>(), 8);
        assert_eq!(mem::size_of::<BSPHeader>(), 8 + 8 * HEADER_LUMPS);
    }

    #[test]
    fn every_slot_has_a_type() {
        for i in 0..HEADER_LUMPS {
            let lump = LumpType::from_usize(i).unwrap();
            assert_eq!(lump as usize, i);
            assert!(!lump.name().is_empty());
        }
        assert!(LumpType::from_usize(HEADER_LUMPS).is_none());
    }

    #[test]
    fn lump_size_multiple() {
        let lump = BSPLump {
            file_len: 33,
            file_ofs: 0,
        };
        assert!(lump.element_count(LumpType::Planes).is_err());
        assert_eq!(lump.element_count(LumpType::Entities).unwrap(), Some(33));
        assert_eq!(lump.element_count(LumpType::PathConnections).unwrap(), None);

        let lump = BSPLump {
            file_len: 32,
            file_ofs: 0,
        };
        assert_eq!(lump.element_count(LumpType::Planes).unwrap(), Some(2));
    }

    #[test]
    fn material_name() {
        let mut material: BSPMaterial = bytemuck::Zeroable::zeroed();
        material.material[..5].copy_from_slice(b"caulk");
        material.content_flags = 0x8000001;
        assert_eq!(material.name(), "caulk");
        assert!(material.contents().contains(Contents::Detail));
        assert!(material.contents().contains(Contents::Solid));
    }

    #[test]
    fn aabb_leaf() {
        let leaf = BSPCollisionAabbTree::new_leaf(3, 7);
        assert_eq!(leaf.children(), Some(AabbTreeChildren::Leaf { partition: 7 }));
        assert_eq!(BSPCollisionAabbTree::new_leaf(3, -1).children(), None);
    }
}
