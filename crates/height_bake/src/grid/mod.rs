//! Uniform 2D grid geometry over a world-space region.
//!
//! [`GridGeometry`] is produced by [`GridBuilder`] and shared by the baker and the
//! [`crate::cache::HeightCache`]. Cells are addressed by [`CellId`] and laid out
//! row-major: `index = x + y * resolution.0`.
use glam::Vec2;

pub mod builder;
pub mod config;

pub use builder::GridBuilder;
pub use config::GridConfig;

/// Identifier for a cell in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(
    /// Cell index along the X axis.
    pub usize,
    /// Cell index along the Y axis.
    pub usize,
);

/// World-space rectangle of a single cell. Derived from the geometry, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub id: CellId,
    /// Minimum corner (inclusive).
    pub min: Vec2,
    /// Maximum corner (exclusive).
    pub max: Vec2,
    pub center: Vec2,
}

/// Origin, cell size and resolution of a uniform grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    /// World-space minimum corner of the covered area.
    pub origin: Vec2,
    /// Cell width and height in world units.
    pub cell_size: f32,
    /// Number of cells along X and Y.
    pub resolution: (usize, usize),
}

impl GridGeometry {
    pub fn new(origin: impl Into<Vec2>, cell_size: f32, resolution: (usize, usize)) -> Self {
        Self {
            origin: origin.into(),
            cell_size,
            resolution,
        }
    }

    /// Returns `true` if the cell size is positive and both axes have at least one cell.
    pub fn is_valid(&self) -> bool {
        self.cell_size.is_finite()
            && self.cell_size > 0.0
            && self.resolution.0 > 0
            && self.resolution.1 > 0
    }

    /// Total number of cells, or `None` if the product overflows.
    pub fn cell_count(&self) -> Option<usize> {
        self.resolution.0.checked_mul(self.resolution.1)
    }

    /// Row-major storage index. Pure arithmetic, no bounds check.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.resolution.0
    }

    /// Returns `true` if `(x, y)` lies in `[0, resolution)`.
    #[inline]
    pub fn contains_cell(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as u64) < self.resolution.0 as u64
            && (y as u64) < self.resolution.1 as u64
    }

    /// Size of the covered area in world units.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.resolution.0 as f32 * self.cell_size,
            self.resolution.1 as f32 * self.cell_size,
        )
    }

    /// World-space maximum corner of the covered area.
    pub fn max_corner(&self) -> Vec2 {
        self.origin + self.extent()
    }

    /// Minimum corner of cell `(x, y)`.
    #[inline]
    pub fn cell_min(&self, x: usize, y: usize) -> Vec2 {
        self.origin + Vec2::new(x as f32, y as f32) * self.cell_size
    }

    /// Center of cell `(x, y)`.
    #[inline]
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        self.origin + Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.cell_size
    }

    /// World-space rectangle of cell `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        let min = self.cell_min(x, y);
        Cell {
            id: CellId(x, y),
            min,
            max: min + Vec2::splat(self.cell_size),
            center: self.cell_center(x, y),
        }
    }

    /// Iterates all cells in row-major order (X fastest).
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        let (rx, ry) = self.resolution;
        (0..ry).flat_map(move |y| (0..rx).map(move |x| CellId(x, y)))
    }

    /// Converts a world position to the unbounded cell coordinates that contain it.
    ///
    /// Returns `None` if the cell size is not positive or the position is not finite.
    pub fn world_to_cell_unbounded(&self, p: impl Into<Vec2>) -> Option<(i64, i64)> {
        if !(self.cell_size > 0.0) {
            return None;
        }
        let p = p.into();
        let fx = ((p.x - self.origin.x) / self.cell_size).floor();
        let fy = ((p.y - self.origin.y) / self.cell_size).floor();
        if !fx.is_finite() || !fy.is_finite() {
            return None;
        }
        Some((fx as i64, fy as i64))
    }

    /// Maps a world position to the cell that contains it.
    ///
    /// Positions outside the grid yield `None`; they are never clamped to an edge cell.
    pub fn world_to_cell(&self, p: impl Into<Vec2>) -> Option<CellId> {
        let (x, y) = self.world_to_cell_unbounded(p)?;
        if !self.contains_cell(x, y) {
            return None;
        }
        Some(CellId(x as usize, y as usize))
    }
}

/// Free-function form of [`GridGeometry::world_to_cell`].
pub fn world_to_cell(geometry: &GridGeometry, p: impl Into<Vec2>) -> Option<CellId> {
    geometry.world_to_cell(p)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn scenario_grid() -> GridGeometry {
        GridGeometry::new(Vec2::ZERO, 500.0, (2, 2))
    }

    fn random_geometry(rng: &mut StdRng) -> GridGeometry {
        let rx = 1 + (rng.next_u32() % 17) as usize;
        let ry = 1 + (rng.next_u32() % 13) as usize;
        let cell_size = 1.0 + (rng.next_u32() % 400) as f32;
        let ox = (rng.next_u32() % 2000) as f32 - 1000.0;
        let oy = (rng.next_u32() % 2000) as f32 - 1000.0;
        GridGeometry::new(Vec2::new(ox, oy), cell_size, (rx, ry))
    }

    #[test]
    fn validity_requires_positive_size_and_resolution() {
        assert!(scenario_grid().is_valid());
        assert!(!GridGeometry::new(Vec2::ZERO, 0.0, (2, 2)).is_valid());
        assert!(!GridGeometry::new(Vec2::ZERO, -1.0, (2, 2)).is_valid());
        assert!(!GridGeometry::new(Vec2::ZERO, 1.0, (0, 2)).is_valid());
        assert!(!GridGeometry::new(Vec2::ZERO, 1.0, (2, 0)).is_valid());
        assert!(!GridGeometry::new(Vec2::ZERO, f32::NAN, (2, 2)).is_valid());
    }

    #[test]
    fn index_is_a_bijection_over_the_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let g = random_geometry(&mut rng);
            let count = g.cell_count().unwrap();
            let mut seen = HashSet::with_capacity(count);
            for CellId(x, y) in g.cells() {
                let i = g.index(x, y);
                assert!(i < count);
                assert!(seen.insert(i), "index {i} produced twice");
            }
            assert_eq!(seen.len(), count);
        }
    }

    #[test]
    fn cells_iterate_row_major() {
        let g = GridGeometry::new(Vec2::ZERO, 1.0, (3, 2));
        let order: Vec<_> = g.cells().map(|CellId(x, y)| g.index(x, y)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn cell_center_round_trips_through_world_to_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let g = random_geometry(&mut rng);
            for CellId(x, y) in g.cells() {
                let center = g.cell_center(x, y);
                assert_eq!(g.world_to_cell(center), Some(CellId(x, y)));
            }
        }
    }

    #[test]
    fn boundary_points_map_to_first_and_last_cell() {
        let g = scenario_grid();
        assert_eq!(g.world_to_cell(g.origin), Some(CellId(0, 0)));

        let near_max = g.max_corner() - Vec2::splat(0.01);
        assert_eq!(g.world_to_cell(near_max), Some(CellId(1, 1)));

        assert_eq!(g.world_to_cell(g.max_corner()), None);
        assert_eq!(g.world_to_cell(Vec2::new(1000.0, 10.0)), None);
        assert_eq!(g.world_to_cell(Vec2::new(10.0, 1500.0)), None);
    }

    #[test]
    fn negative_positions_are_outside() {
        let g = scenario_grid();
        assert_eq!(g.world_to_cell(Vec2::new(-1.0, -1.0)), None);
        assert_eq!(world_to_cell(&g, Vec2::new(-0.001, 10.0)), None);
        assert_eq!(g.world_to_cell_unbounded(Vec2::new(-1.0, -1.0)), Some((-1, -1)));
    }

    #[test]
    fn world_to_cell_rejects_degenerate_input() {
        let g = GridGeometry::new(Vec2::ZERO, 0.0, (2, 2));
        assert_eq!(g.world_to_cell(Vec2::ZERO), None);

        let g = scenario_grid();
        assert_eq!(g.world_to_cell(Vec2::new(f32::NAN, 0.0)), None);
        assert_eq!(g.world_to_cell(Vec2::new(f32::INFINITY, 0.0)), None);
    }

    #[test]
    fn world_to_cell_accepts_mint_points() {
        let g = scenario_grid();
        let p = mint::Point2 { x: 750.0, y: 250.0 };
        assert_eq!(g.world_to_cell(p), Some(CellId(1, 0)));
    }

    #[test]
    fn cell_rectangle_matches_origin_and_size() {
        let g = GridGeometry::new(Vec2::new(-100.0, 50.0), 10.0, (4, 4));
        let cell = g.cell(2, 1);
        assert_eq!(cell.id, CellId(2, 1));
        assert_eq!(cell.min, Vec2::new(-80.0, 60.0));
        assert_eq!(cell.max, Vec2::new(-70.0, 70.0));
        assert_eq!(cell.center, Vec2::new(-75.0, 65.0));
        assert_eq!(g.extent(), Vec2::new(40.0, 40.0));
        assert_eq!(g.max_corner(), Vec2::new(-60.0, 90.0));
    }
}
