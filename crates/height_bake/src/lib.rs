#![forbid(unsafe_code)]
//! height_bake: Per-cell maximum terrain height baking over a uniform 2D grid.
//!
//! Modules:
//! - grid: grid geometry, construction from terrain bounds, and meter-based configuration
//! - cache: dense per-cell height storage with explicit unsampled cells
//! - bake: sub-cell ray sampling through an injected intersection provider, events, cancellation
//! - query: world position to cell lookups on a baked cache
//! - session: build → bake → query flow with state checks
//! - terrain, units: terrain bounds sources and centimeter/meter conversions
//!
//! For examples and docs, see README and the `height_bake_examples` crate.
pub mod bake;
pub mod cache;
pub mod error;
pub mod grid;
pub mod query;
pub mod session;
pub mod terrain;
pub mod units;

/// Convenient re-exports for common types. Import with `use height_bake::prelude::*;`.
pub mod prelude {
    pub use crate::bake::{
        bake, BakeEvent, BakeEventKind, BakeOutput, BakeSettings, BakeStats, CancelFlag,
        EventSink, FnSink, GridBaker, HeightFieldProvider, IntersectionProvider, MultiSink,
        SubCellSampler, VecSink,
    };
    pub use crate::cache::HeightCache;
    pub use crate::error::{Error, Result};
    pub use crate::grid::{world_to_cell, Cell, CellId, GridBuilder, GridConfig, GridGeometry};
    pub use crate::query::{CellWindow, HeightProbe, HeightSample};
    pub use crate::session::HeightBakeSession;
    pub use crate::terrain::{Aabb, StaticTerrain, TerrainSource};
    pub use crate::units::{cm_to_meters, meters_to_cm, CM_PER_METER};
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use crate::prelude::*;

    fn scenario_grid() -> GridGeometry {
        GridBuilder::build(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1000.0, 1000.0, 0.0),
            500.0,
            0.0,
        )
        .expect("scenario grid builds")
    }

    fn scenario_cache() -> HeightCache {
        let mut provider = |top: Vec3, _bottom: Vec3| -> Option<Vec3> {
            (top.x < 500.0 && top.y < 500.0).then(|| top.truncate().extend(50.0))
        };
        bake(&scenario_grid(), &BakeSettings::new(3), &mut provider).expect("scenario bakes")
    }

    #[test]
    fn scenario_a_grid_geometry() {
        let grid = scenario_grid();
        assert_eq!(grid.resolution, (2, 2));
        assert_eq!(grid.origin, Vec2::ZERO);
        assert_eq!(grid.cell_size, 500.0);
    }

    #[test]
    fn scenario_b_single_cell_surface() {
        let cache = scenario_cache();
        assert_eq!(cache.max_height_at(0, 0), Ok(Some(50.0)));
        for (x, y) in [(1, 0), (0, 1), (1, 1)] {
            assert_eq!(cache.max_height_at(x, y), Ok(None));
        }
    }

    #[test]
    fn scenario_c_negative_position_is_outside() {
        assert_eq!(world_to_cell(&scenario_grid(), Vec2::new(-1.0, -1.0)), None);
    }

    #[test]
    fn scenario_d_height_above_baseline() {
        let mut cache = scenario_cache();
        cache.set_baseline(10.0);
        let h = cache.height_above_baseline(0, 0).unwrap().unwrap();
        assert!((h - 0.4).abs() < 1e-6);
    }
}
