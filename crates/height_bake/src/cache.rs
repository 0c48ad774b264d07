//! Dense per-cell storage of baked maximum heights.
//!
//! A [`HeightCache`] owns one slot per grid cell plus the [`GridGeometry`] it was
//! allocated with. Slots hold `Some(world_z)` for sampled cells and `None` for cells
//! where no ray hit the terrain, so an unsampled cell is never confused with a real
//! height of zero.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::grid::{CellId, GridGeometry};
use crate::units::CM_PER_METER;

/// Per-cell maximum world elevation over a uniform grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightCache {
    geometry: GridGeometry,
    max_heights: Vec<Option<f32>>,
    /// Reference elevation (e.g. sea level) for [`HeightCache::height_above_baseline`].
    baseline: f32,
    /// Divisor applied to heights above the baseline. Defaults to centimeters to meters.
    unit_scale: f32,
}

impl HeightCache {
    /// Creates an unallocated cache with the given origin and cell size.
    ///
    /// The cache is invalid until [`HeightCache::allocate`] succeeds.
    pub fn new(origin: impl Into<Vec2>, cell_size: f32) -> Self {
        Self {
            geometry: GridGeometry::new(origin, cell_size, (0, 0)),
            max_heights: Vec::new(),
            baseline: 0.0,
            unit_scale: CM_PER_METER,
        }
    }

    /// Creates a cache for `geometry` with every cell unsampled.
    pub fn with_geometry(geometry: &GridGeometry) -> Result<Self> {
        if !geometry.is_valid() {
            return Err(Error::InvalidConfig(
                "geometry needs cell_size > 0 and a non-empty resolution".into(),
            ));
        }
        let mut cache = Self::new(geometry.origin, geometry.cell_size);
        cache.allocate(geometry.resolution.0, geometry.resolution.1)?;
        Ok(cache)
    }

    /// Sets the baseline elevation.
    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the unit scale used by [`HeightCache::height_above_baseline`].
    pub fn with_unit_scale(mut self, unit_scale: f32) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Resizes storage to `resolution_x * resolution_y` unsampled cells.
    ///
    /// On error the cache is left untouched.
    pub fn allocate(&mut self, resolution_x: usize, resolution_y: usize) -> Result<()> {
        if resolution_x == 0 || resolution_y == 0 {
            return Err(Error::InvalidConfig(
                "resolution must be >= 1 on both axes".into(),
            ));
        }
        let len = resolution_x
            .checked_mul(resolution_y)
            .ok_or_else(|| Error::InvalidConfig("cell count overflows".into()))?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(len)
            .map_err(|_| Error::InvalidConfig("cell count too large".into()))?;
        storage.resize(len, None);

        self.max_heights = storage;
        self.geometry.resolution = (resolution_x, resolution_y);
        Ok(())
    }

    /// Returns `true` if the geometry is usable and storage matches the resolution.
    pub fn is_valid(&self) -> bool {
        self.geometry.is_valid() && self.geometry.cell_count() == Some(self.max_heights.len())
    }

    /// Like [`HeightCache::is_valid`], but reports failure as [`Error::NotBaked`].
    ///
    /// Call this on caches restored from storage before using them.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::NotBaked)
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.geometry.resolution
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn set_baseline(&mut self, baseline: f32) {
        self.baseline = baseline;
    }

    pub fn unit_scale(&self) -> f32 {
        self.unit_scale
    }

    /// Row-major storage index. Pure arithmetic, no bounds check.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.geometry.index(x, y)
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        let (rx, ry) = self.geometry.resolution;
        if x >= rx || y >= ry {
            return Err(out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        if idx >= self.max_heights.len() {
            return Err(out_of_bounds(x, y));
        }
        Ok(idx)
    }

    /// Baked maximum world elevation of cell `(x, y)`; `Ok(None)` if unsampled.
    pub fn max_height_at(&self, x: usize, y: usize) -> Result<Option<f32>> {
        let idx = self.checked_index(x, y)?;
        Ok(self.max_heights[idx])
    }

    /// Stores the maximum elevation of cell `(x, y)`. `None` marks the cell unsampled.
    pub fn set_max_height_at(&mut self, x: usize, y: usize, value: Option<f32>) -> Result<()> {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig("height must be finite".into()));
        }
        let idx = self.checked_index(x, y)?;
        self.max_heights[idx] = value;
        Ok(())
    }

    /// `(max_height - baseline) / unit_scale` for cell `(x, y)`; `Ok(None)` if unsampled.
    pub fn height_above_baseline(&self, x: usize, y: usize) -> Result<Option<f32>> {
        Ok(self
            .max_height_at(x, y)?
            .map(|z| (z - self.baseline) / self.unit_scale))
    }

    /// Maps a world position to a cell of this cache's grid.
    pub fn world_to_cell(&self, p: impl Into<Vec2>) -> Option<CellId> {
        self.geometry.world_to_cell(p)
    }

    /// All slots in row-major order.
    pub fn max_heights(&self) -> &[Option<f32>] {
        &self.max_heights
    }

    /// Number of cells holding a sampled height.
    pub fn sampled_count(&self) -> usize {
        self.max_heights.iter().filter(|v| v.is_some()).count()
    }

    /// Lowest and highest sampled heights, or `None` if nothing was sampled.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.max_heights
            .iter()
            .flatten()
            .fold(None, |acc, &z| match acc {
                None => Some((z, z)),
                Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
            })
    }
}

fn out_of_bounds(x: usize, y: usize) -> Error {
    Error::OutOfBounds {
        x: i64::try_from(x).unwrap_or(i64::MAX),
        y: i64::try_from(y).unwrap_or(i64::MAX),
    }
}
