//! Analytic terrain surfaces used as stand-ins for a real collision system.
use glam::Vec2;
use height_bake::prelude::Aabb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smooth sine/cosine landscape, defined everywhere. Heights in centimeters.
pub fn rolling_hills(p: Vec2) -> Option<f32> {
    let waves = (p.x * 0.0011).sin() * 1800.0 + (p.y * 0.0017).cos() * 1200.0;
    let ridge = ((p.x + p.y) * 0.0004).sin().abs() * 900.0;
    Some(waves + ridge)
}

/// A single Gaussian bump.
#[derive(Debug, Clone, Copy)]
pub struct Hill {
    pub center: Vec2,
    pub radius: f32,
    pub height: f32,
}

/// Sum of Gaussian hills over a flat base, with no surface outside `bounds`.
#[derive(Debug, Clone)]
pub struct HillField {
    pub bounds: Aabb,
    pub base_z: f32,
    pub hills: Vec<Hill>,
}

impl HillField {
    /// Scatters `count` hills inside `bounds` from a seeded RNG.
    pub fn random(bounds: Aabb, base_z: f32, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = bounds.extent().truncate();
        let origin = bounds.min.truncate();
        let hills = (0..count)
            .map(|_| Hill {
                center: origin + Vec2::new(rand01(&mut rng), rand01(&mut rng)) * extent,
                radius: extent.min_element() * (0.03 + 0.12 * rand01(&mut rng)),
                height: 300.0 + 2500.0 * rand01(&mut rng),
            })
            .collect();
        Self {
            bounds,
            base_z,
            hills,
        }
    }

    pub fn elevation(&self, p: Vec2) -> Option<f32> {
        if !self.bounds.contains_xy(p) {
            return None;
        }
        let bumps: f32 = self
            .hills
            .iter()
            .map(|h| {
                let d2 = (p - h.center).length_squared();
                h.height * (-d2 / (h.radius * h.radius)).exp()
            })
            .sum();
        Some(self.base_z + bumps)
    }
}

fn rand01(rng: &mut impl Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
