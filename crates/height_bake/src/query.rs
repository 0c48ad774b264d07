//! Read-side queries against a baked [`HeightCache`].
//!
//! [`HeightProbe`] maps world positions to cells and returns the cached maximum height.
//! Positions outside the grid are reported as [`Error::OutsideGrid`] so read-heavy
//! callers can treat a miss as ordinary control flow.
use glam::Vec2;

use crate::cache::HeightCache;
use crate::error::{Error, Result};
use crate::grid::{CellId, GridGeometry};

/// Result of probing a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightSample {
    /// Queried world position.
    pub position: Vec2,
    /// Cell containing the position.
    pub cell: CellId,
    /// Maximum world elevation of the cell, `None` if unsampled.
    pub max_height: Option<f32>,
    /// Height above the cache baseline in output units, `None` if unsampled.
    pub above_baseline: Option<f32>,
}

/// Inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWindow {
    pub min: CellId,
    pub max: CellId,
}

impl CellWindow {
    pub fn width(&self) -> usize {
        self.max.0 - self.min.0 + 1
    }

    pub fn height(&self) -> usize {
        self.max.1 - self.min.1 + 1
    }

    /// Iterates the window in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        let (min, max) = (self.min, self.max);
        (min.1..=max.1).flat_map(move |y| (min.0..=max.0).map(move |x| CellId(x, y)))
    }
}

/// World-position lookups on a baked cache.
pub struct HeightProbe;

impl HeightProbe {
    /// Looks up the cell containing `p` and its cached heights.
    pub fn query(cache: &HeightCache, p: impl Into<Vec2>) -> Result<HeightSample> {
        cache.validate()?;
        let position = p.into();
        let cell = cache.world_to_cell(position).ok_or(Error::OutsideGrid {
            x: position.x,
            y: position.y,
        })?;
        let CellId(x, y) = cell;

        Ok(HeightSample {
            position,
            cell,
            max_height: cache.max_height_at(x, y)?,
            above_baseline: cache.height_above_baseline(x, y)?,
        })
    }

    /// Queries every point, keeping per-point failures.
    pub fn query_many<I, P>(cache: &HeightCache, points: I) -> Vec<Result<HeightSample>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        points
            .into_iter()
            .map(|p| Self::query(cache, p))
            .collect()
    }

    /// Cells within `radius` cells of the cell containing `center`, clipped to the grid.
    ///
    /// Returns `None` if the window does not overlap the grid.
    pub fn cells_around(
        geometry: &GridGeometry,
        center: impl Into<Vec2>,
        radius: usize,
    ) -> Option<CellWindow> {
        if !geometry.is_valid() {
            return None;
        }
        let (cx, cy) = geometry.world_to_cell_unbounded(center)?;
        let r = i64::try_from(radius).ok()?;
        let last_x = geometry.resolution.0 as i64 - 1;
        let last_y = geometry.resolution.1 as i64 - 1;

        let min_x = cx.saturating_sub(r).max(0);
        let min_y = cy.saturating_sub(r).max(0);
        let max_x = cx.saturating_add(r).min(last_x);
        let max_y = cy.saturating_add(r).min(last_y);
        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(CellWindow {
            min: CellId(min_x as usize, min_y as usize),
            max: CellId(max_x as usize, max_y as usize),
        })
    }
}
