//! Intersection providers: the vertical ray casts the baker issues.
//!
//! The terrain or collision system is injected through [`IntersectionProvider`].
//! Any `FnMut(Vec3, Vec3) -> Option<Vec3>` closure is a provider, and
//! [`HeightFieldProvider`] adapts an analytic elevation function.
use glam::{Vec2, Vec3};

/// Casts a single vertical ray against the terrain surface.
pub trait IntersectionProvider {
    /// Returns the topmost hit point between `top` and `bottom`, or `None` on a miss.
    fn cast_vertical(&mut self, top: Vec3, bottom: Vec3) -> Option<Vec3>;
}

impl<F> IntersectionProvider for F
where
    F: FnMut(Vec3, Vec3) -> Option<Vec3>,
{
    #[inline]
    fn cast_vertical(&mut self, top: Vec3, bottom: Vec3) -> Option<Vec3> {
        self(top, bottom)
    }
}

/// Provider backed by an elevation function `f(xy) -> Option<z>`.
///
/// A ray hits only if the surface elevation lies within `[bottom.z, top.z]`.
#[derive(Clone)]
pub struct HeightFieldProvider<F>
where
    F: Fn(Vec2) -> Option<f32>,
{
    elevation: F,
}

impl<F> HeightFieldProvider<F>
where
    F: Fn(Vec2) -> Option<f32>,
{
    pub fn new(elevation: F) -> Self {
        Self { elevation }
    }

    /// Surface elevation at `p`, ignoring any ray span.
    pub fn elevation_at(&self, p: Vec2) -> Option<f32> {
        (self.elevation)(p)
    }
}

impl<F> IntersectionProvider for HeightFieldProvider<F>
where
    F: Fn(Vec2) -> Option<f32>,
{
    fn cast_vertical(&mut self, top: Vec3, bottom: Vec3) -> Option<Vec3> {
        let z = (self.elevation)(top.truncate())?;
        if z > top.z || z < bottom.z {
            return None;
        }
        Some(top.truncate().extend(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_providers() {
        let mut calls = 0;
        let mut provider = |top: Vec3, _bottom: Vec3| {
            calls += 1;
            Some(Vec3::new(top.x, top.y, 12.0))
        };
        let hit = provider.cast_vertical(Vec3::new(1.0, 2.0, 100.0), Vec3::new(1.0, 2.0, -100.0));
        assert_eq!(hit, Some(Vec3::new(1.0, 2.0, 12.0)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn height_field_respects_ray_span() {
        let mut provider = HeightFieldProvider::new(|p: Vec2| Some(p.x));
        let top = |x: f32| Vec3::new(x, 0.0, 50.0);
        let bottom = |x: f32| Vec3::new(x, 0.0, -50.0);

        assert_eq!(
            provider.cast_vertical(top(10.0), bottom(10.0)),
            Some(Vec3::new(10.0, 0.0, 10.0))
        );
        assert_eq!(
            provider.cast_vertical(top(50.0), bottom(50.0)),
            Some(Vec3::new(50.0, 0.0, 50.0))
        );
        assert_eq!(provider.cast_vertical(top(60.0), bottom(60.0)), None);
        assert_eq!(provider.cast_vertical(top(-60.0), bottom(-60.0)), None);
    }

    #[test]
    fn height_field_passes_through_holes() {
        let mut provider =
            HeightFieldProvider::new(|p: Vec2| if p.x < 0.0 { None } else { Some(1.0) });
        assert!(provider
            .cast_vertical(Vec3::new(-1.0, 0.0, 10.0), Vec3::new(-1.0, 0.0, -10.0))
            .is_none());
        assert_eq!(provider.elevation_at(Vec2::new(3.0, 0.0)), Some(1.0));
    }
}
