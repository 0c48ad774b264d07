//! Grid construction from terrain bounds.
//!
//! [`GridBuilder::build`] pads the source bounds, then picks the smallest resolution
//! whose cells fully cover the padded region. The last row and column may reach past
//! the padded bounds when the extent is not a multiple of the cell size.
use glam::{Vec2, Vec3};
use tracing::info;

use crate::error::{Error, Result};
use crate::grid::{GridConfig, GridGeometry};
use crate::terrain::{Aabb, TerrainSource};
use crate::units::cm_to_meters;

/// Computes [`GridGeometry`] from bounds, cell size and padding.
pub struct GridBuilder;

impl GridBuilder {
    /// Builds the geometry covering `[bounds_min, bounds_max]` expanded by `padding`.
    ///
    /// Only the XY components of the bounds are used.
    pub fn build(
        bounds_min: impl Into<Vec3>,
        bounds_max: impl Into<Vec3>,
        cell_size: f32,
        padding: f32,
    ) -> Result<GridGeometry> {
        let bounds_min = bounds_min.into().truncate();
        let bounds_max = bounds_max.into().truncate();

        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(Error::InvalidConfig("cell_size must be > 0".into()));
        }
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(Error::InvalidConfig("padding must be >= 0".into()));
        }
        if !bounds_min.is_finite() || !bounds_max.is_finite() {
            return Err(Error::InvalidConfig("bounds must be finite".into()));
        }
        if bounds_min.x > bounds_max.x || bounds_min.y > bounds_max.y {
            return Err(Error::InvalidConfig(
                "bounds min must be <= bounds max componentwise".into(),
            ));
        }

        let padded_min = bounds_min - Vec2::splat(padding);
        let padded_max = bounds_max + Vec2::splat(padding);
        let extent = padded_max - padded_min;

        let resolution = (
            cells_for_extent(extent.x, cell_size)?,
            cells_for_extent(extent.y, cell_size)?,
        );
        let geometry = GridGeometry::new(padded_min, cell_size, resolution);
        let total = geometry
            .cell_count()
            .ok_or_else(|| Error::InvalidConfig("grid cell count overflows".into()))?;

        info!(
            "Grid built: size={} x {} (cells={}), cell_size={:.2}m",
            resolution.0,
            resolution.1,
            total,
            cm_to_meters(cell_size)
        );

        Ok(geometry)
    }

    /// Builds the geometry covering a bounding box.
    pub fn build_from_bounds(bounds: &Aabb, cell_size: f32, padding: f32) -> Result<GridGeometry> {
        Self::build(bounds.min, bounds.max, cell_size, padding)
    }

    /// Builds the geometry for a terrain using a meter-based [`GridConfig`].
    pub fn build_for_terrain(
        terrain: &dyn TerrainSource,
        config: &GridConfig,
    ) -> Result<GridGeometry> {
        config.validate()?;
        let bounds = terrain.world_bounds().ok_or(Error::MissingTerrain)?;
        Self::build_from_bounds(&bounds, config.cell_size_cm(), config.padding_cm())
    }
}

fn cells_for_extent(extent: f32, cell_size: f32) -> Result<usize> {
    let n = (extent / cell_size).ceil().max(1.0);
    if !n.is_finite() || n >= usize::MAX as f32 {
        return Err(Error::InvalidConfig(
            "extent / cell_size is too large for a grid axis".into(),
        ));
    }
    Ok(n as usize)
}
