pub use crate::bsp::{
    brush::{BSPBrush, BSPBrushSide},
    collision::{AabbTreeChildren, BSPCollisionAabbTree},
    consts::{Contents, LumpType},
    header::BSPHeader,
    material::BSPMaterial,
    model::BSPModel,
    plane::BSPPlane,
    portal::{BSPPortal, BSPPortalVertex},
};
pub use crate::entities::Entity;
pub use crate::error::{BspError, FormatError};
pub use crate::level::{LevelData, LumpStats};
pub use crate::map_writer::{export_file, export_map, ExportOptions, PortalMaterialFilter};
pub use crate::reconstruct::{reconstruct, ReconstructedGeometry};
