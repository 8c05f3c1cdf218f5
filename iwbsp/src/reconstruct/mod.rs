//! Geometry passes over a loaded level. Each pass only reads [`LevelData`].

pub mod brush;
pub mod patch;
pub mod portal;

use std::ops::Range;

use crate::{bsp::model::BSPModel, entities::Entity, level::LevelData};

use self::{brush::MapBrush, patch::Patch};

/// Everything the map writer needs, owned.
pub struct ReconstructedGeometry {
    pub entities: Vec<Entity>,
    /// Every brush of the level, in lump order. Degenerate brushes have no faces.
    pub brushes: Vec<MapBrush>,
    /// Brush range of each model, clamped to `brushes`. Model 0 is the world, the others
    /// belong to `"model" "*N"` entities.
    pub models: Vec<Range<usize>>,
    /// One brush per merged portal.
    pub portals: Vec<MapBrush>,
    pub patches: Vec<Patch>,
}

impl ReconstructedGeometry {
    pub fn model_brushes(&self, model: usize) -> Option<&[MapBrush]> {
        self.models.get(model).map(|range| &self.brushes[range.clone()])
    }
}

pub fn reconstruct(level: &LevelData) -> ReconstructedGeometry {
    let brushes = brush::build_brushes(level);

    let models = level
        .lump::<BSPModel>()
        .iter()
        .enumerate()
        .map(|(i, model)| {
            let range = model.brushes();
            if range.end > brushes.len() {
                log::warn!("Model {} brushes run past the brush lump", i);
            }
            range.start.min(brushes.len())..range.end.min(brushes.len())
        })
        .collect();

    let portals = portal::build_portal_brushes(level);
    let patches = patch::extract_patches(level);

    log::info!(
        "Reconstructed {} brushes, {} portal brushes, {} patches",
        brushes.len(),
        portals.len(),
        patches.len()
    );

    ReconstructedGeometry {
        entities: level.entities().to_vec(),
        brushes,
        models,
        portals,
        patches,
    }
}

#[cfg(test)]
mod reconstruct_tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        bsp::{brush::BSPBrush, LumpType},
        testing::{axial_sides, material, ContainerBuilder},
    };

    fn model(first_brush: u32, num_brushes: u32) -> BSPModel {
        let mut model: BSPModel = bytemuck::Zeroable::zeroed();
        model.first_brush = first_brush;
        model.num_brushes = num_brushes;
        model
    }

    #[test]
    fn models_split_brushes() {
        let mut sides = Vec::new();
        for i in 0..3 {
            let mins = Vec3::splat(i as f32 * 100.0);
            sides.extend(axial_sides(mins, mins + 8.0, 0));
        }
        let brush = BSPBrush {
            num_sides: 6,
            material_num: 0,
        };
        let level = ContainerBuilder::new()
            .lump(LumpType::Materials, &[material("caulk", 1)])
            .lump(LumpType::Brushes, &[brush; 3])
            .lump(LumpType::BrushSides, &sides)
            .lump(LumpType::Models, &[model(0, 2), model(2, 1), model(2, 5)])
            .raw(
                LumpType::Entities,
                b"{\n\"classname\" \"worldspawn\"\n}\n{\n\"classname\" \"script_brushmodel\"\n\"model\" \"*1\"\n}\n\0",
            )
            .load()
            .unwrap();

        let geometry = reconstruct(&level);
        assert_eq!(geometry.brushes.len(), 3);
        assert_eq!(geometry.model_brushes(0).map(<[_]>::len), Some(2));
        assert_eq!(geometry.model_brushes(1).map(<[_]>::len), Some(1));
        assert_eq!(geometry.models[2], 2..3);
        assert!(geometry.model_brushes(3).is_none());
        assert_eq!(geometry.entities.len(), 2);
        assert_eq!(geometry.entities[1].brush_model(), Some(1));
    }

    #[test]
    fn no_models_means_all_world() {
        let level = ContainerBuilder::new()
            .lump(
                LumpType::Brushes,
                &[BSPBrush {
                    num_sides: 6,
                    material_num: 0,
                }],
            )
            .lump(LumpType::BrushSides, &axial_sides(Vec3::ZERO, Vec3::ONE, 0))
            .load()
            .unwrap();

        let geometry = reconstruct(&level);
        assert_eq!(geometry.brushes.len(), 1);
        assert!(geometry.models.is_empty());
        assert!(geometry.portals.is_empty());
        assert!(geometry.patches.is_empty());
    }
}
