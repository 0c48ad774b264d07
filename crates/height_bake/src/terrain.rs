//! Terrain bounds and reference elevation supplied by the host.
//!
//! The terrain itself is opaque to this crate. A [`TerrainSource`] only reports the
//! axis-aligned world bounds to cover and the anchor elevation that vertical rays
//! are measured from.
use glam::{Vec2, Vec3};

/// Axis-aligned world-space bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, ordering them componentwise.
    pub fn new(a: impl Into<Vec3>, b: impl Into<Vec3>) -> Self {
        let a = a.into();
        let b = b.into();
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns `true` if the XY projection of `p` lies inside the box, edges included.
    pub fn contains_xy(&self, p: impl Into<Vec2>) -> bool {
        let p = p.into();
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Source of terrain bounds and reference elevation.
pub trait TerrainSource {
    /// World bounds of the terrain, or `None` if no terrain is configured.
    fn world_bounds(&self) -> Option<Aabb>;

    /// Elevation that trace spans are measured from.
    fn anchor_elevation(&self) -> f32 {
        self.world_bounds().map_or(0.0, |b| b.min.z)
    }
}

impl TerrainSource for Aabb {
    fn world_bounds(&self) -> Option<Aabb> {
        Some(*self)
    }
}

impl<T: TerrainSource + ?Sized> TerrainSource for &T {
    fn world_bounds(&self) -> Option<Aabb> {
        (**self).world_bounds()
    }

    fn anchor_elevation(&self) -> f32 {
        (**self).anchor_elevation()
    }
}

/// Fixed terrain description with an explicit anchor elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticTerrain {
    pub bounds: Option<Aabb>,
    pub anchor_z: f32,
}

impl StaticTerrain {
    pub fn new(bounds: Aabb, anchor_z: f32) -> Self {
        Self {
            bounds: Some(bounds),
            anchor_z,
        }
    }

    /// A terrain source that reports no terrain.
    pub fn empty() -> Self {
        Self {
            bounds: None,
            anchor_z: 0.0,
        }
    }
}

impl TerrainSource for StaticTerrain {
    fn world_bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    fn anchor_elevation(&self) -> f32 {
        self.anchor_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(10.0, -5.0, 3.0), Vec3::new(-10.0, 5.0, -3.0));
        assert_eq!(b.min, Vec3::new(-10.0, -5.0, -3.0));
        assert_eq!(b.max, Vec3::new(10.0, 5.0, 3.0));
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.extent(), Vec3::new(20.0, 10.0, 6.0));
    }

    #[test]
    fn contains_xy_includes_edges() {
        let b = Aabb::new(Vec3::ZERO, Vec3::new(100.0, 100.0, 10.0));
        assert!(b.contains_xy(Vec2::new(0.0, 0.0)));
        assert!(b.contains_xy(Vec2::new(100.0, 100.0)));
        assert!(b.contains_xy(Vec2::new(50.0, 20.0)));
        assert!(!b.contains_xy(Vec2::new(100.1, 50.0)));
        assert!(!b.contains_xy(Vec2::new(50.0, -0.1)));
    }

    #[test]
    fn anchor_defaults_to_bounds_floor() {
        let b = Aabb::new(Vec3::new(0.0, 0.0, -250.0), Vec3::new(1.0, 1.0, 900.0));
        assert_eq!(b.anchor_elevation(), -250.0);
        assert_eq!(StaticTerrain::new(b, 42.0).anchor_elevation(), 42.0);
        assert!(StaticTerrain::empty().world_bounds().is_none());
    }
}
