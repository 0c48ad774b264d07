//! Deterministic sub-cell sample placement.
//!
//! Each cell is split into an `n x n` sub-grid and sampled once at every sub-cell
//! center. There is no jitter, so identical inputs always produce identical points.
use glam::Vec2;

use crate::error::{Error, Result};

/// Sub-cell center sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCellSampler {
    samples_per_axis: u32,
    /// Sample offsets in cell-local `[0, 1)^2` coordinates, `sy` outer, `sx` inner.
    unit_offsets: Vec<Vec2>,
}

impl SubCellSampler {
    pub fn new(samples_per_axis: u32) -> Result<Self> {
        if samples_per_axis == 0 {
            return Err(Error::InvalidConfig("samples_per_axis must be >= 1".into()));
        }

        let n = samples_per_axis as f32;
        let count = samples_per_axis as usize * samples_per_axis as usize;
        let mut unit_offsets = Vec::with_capacity(count);
        for sy in 0..samples_per_axis {
            for sx in 0..samples_per_axis {
                let u = (sx as f32 + 0.5) / n;
                let v = (sy as f32 + 0.5) / n;
                unit_offsets.push(Vec2::new(u, v));
            }
        }

        Ok(Self {
            samples_per_axis,
            unit_offsets,
        })
    }

    pub fn samples_per_axis(&self) -> u32 {
        self.samples_per_axis
    }

    pub fn samples_per_cell(&self) -> usize {
        self.unit_offsets.len()
    }

    pub fn unit_offsets(&self) -> &[Vec2] {
        &self.unit_offsets
    }

    /// World-space sample points for the cell whose minimum corner is `cell_min`.
    pub fn sample_points(
        &self,
        cell_min: Vec2,
        cell_size: f32,
    ) -> impl Iterator<Item = Vec2> + '_ {
        self.unit_offsets
            .iter()
            .map(move |uv| cell_min + *uv * cell_size)
    }
}
