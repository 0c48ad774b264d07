//! Baking per-cell maximum heights into a [`HeightCache`].
//!
//! [`GridBaker`] sweeps the grid row-major. For every cell it traces one vertical ray
//! per sub-sample (see [`SubCellSampler`]) through an [`IntersectionProvider`] and
//! keeps the highest hit. Cells where every ray misses stay unsampled.
//!
//! Typical usage:
//! - Build a [`GridGeometry`] with [`crate::grid::GridBuilder`].
//! - Create a baker from [`BakeSettings`] and call [`GridBaker::bake`] with a provider.
//! - Query the returned cache through [`crate::query::HeightProbe`].
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::cache::HeightCache;
use crate::error::{Error, Result};
use crate::grid::{CellId, GridConfig, GridGeometry};

pub mod events;
pub mod provider;
pub mod sampler;

pub use events::{BakeEvent, BakeEventKind, EventSink, FnSink, MultiSink, VecSink};
pub use provider::{HeightFieldProvider, IntersectionProvider};
pub use sampler::SubCellSampler;

/// Sampling and tracing parameters for a bake, in world units.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct BakeSettings {
    /// Sub-samples per cell along each axis.
    pub samples_per_axis: u32,
    /// Ray start height above `reference_z`.
    pub trace_above: f32,
    /// Ray end depth below `reference_z`.
    pub trace_below: f32,
    /// Elevation the trace span is measured from, e.g. the terrain's anchor height.
    pub reference_z: f32,
}

impl Default for BakeSettings {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            samples_per_axis: config.samples_per_axis,
            trace_above: config.trace_above_cm(),
            trace_below: config.trace_below_cm(),
            reference_z: 0.0,
        }
    }
}

impl BakeSettings {
    pub fn new(samples_per_axis: u32) -> Self {
        Self {
            samples_per_axis,
            ..Default::default()
        }
    }

    /// Derives settings from a meter-based [`GridConfig`] and a reference elevation.
    pub fn from_config(config: &GridConfig, reference_z: f32) -> Self {
        Self {
            samples_per_axis: config.samples_per_axis,
            trace_above: config.trace_above_cm(),
            trace_below: config.trace_below_cm(),
            reference_z,
        }
    }

    pub fn with_samples_per_axis(mut self, samples_per_axis: u32) -> Self {
        self.samples_per_axis = samples_per_axis;
        self
    }

    pub fn with_trace_span(mut self, above: f32, below: f32) -> Self {
        self.trace_above = above;
        self.trace_below = below;
        self
    }

    pub fn with_reference_z(mut self, reference_z: f32) -> Self {
        self.reference_z = reference_z;
        self
    }

    /// Start and end elevation of every traced ray.
    pub fn trace_span(&self) -> (f32, f32) {
        (
            self.reference_z + self.trace_above,
            self.reference_z - self.trace_below,
        )
    }

    /// Validates the settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_axis == 0 {
            return Err(Error::InvalidConfig("samples_per_axis must be >= 1".into()));
        }
        if !(self.trace_above.is_finite()
            && self.trace_below.is_finite()
            && self.reference_z.is_finite())
        {
            return Err(Error::InvalidConfig("trace span must be finite".into()));
        }
        let (top, bottom) = self.trace_span();
        if top <= bottom {
            return Err(Error::InvalidConfig(
                "trace span must cover a positive height range".into(),
            ));
        }

        Ok(())
    }
}

/// Counters collected during a bake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeStats {
    pub cells: usize,
    pub samples_per_cell: usize,
    pub total_traces: usize,
    pub hits: usize,
    pub cells_with_hits: usize,
}

/// Result of a bake: the filled cache and its statistics.
#[derive(Debug, Clone)]
pub struct BakeOutput {
    pub cache: HeightCache,
    pub stats: BakeStats,
}

/// Shared flag for cooperative cancellation, checked between cells.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Sweeps a grid and records the highest terrain hit per cell.
#[derive(Debug, Clone)]
pub struct GridBaker {
    settings: BakeSettings,
    sampler: SubCellSampler,
    cancel: Option<CancelFlag>,
}

impl GridBaker {
    pub fn try_new(settings: BakeSettings) -> Result<Self> {
        settings.validate()?;
        let sampler = SubCellSampler::new(settings.samples_per_axis)?;
        Ok(Self {
            settings,
            sampler,
            cancel: None,
        })
    }

    /// Attaches a flag that aborts the bake with [`Error::Cancelled`] once set.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn settings(&self) -> &BakeSettings {
        &self.settings
    }

    /// Bakes `geometry` into a new cache.
    pub fn bake<P>(&self, geometry: &GridGeometry, provider: &mut P) -> Result<BakeOutput>
    where
        P: IntersectionProvider + ?Sized,
    {
        self.bake_with_events(geometry, provider, &mut ())
    }

    /// Bakes `geometry` into a new cache, reporting progress to `sink`.
    ///
    /// Fails before tracing anything if the geometry is invalid. A cancelled bake
    /// returns [`Error::Cancelled`] and no cache.
    pub fn bake_with_events<P>(
        &self,
        geometry: &GridGeometry,
        provider: &mut P,
        sink: &mut dyn EventSink,
    ) -> Result<BakeOutput>
    where
        P: IntersectionProvider + ?Sized,
    {
        let mut cache = HeightCache::with_geometry(geometry)?;
        let samples_per_cell = self.sampler.samples_per_cell();
        let mut stats = BakeStats {
            cells: cache.max_heights().len(),
            samples_per_cell,
            ..Default::default()
        };

        info!(
            "Bake started: cells={}, samples_per_cell={}",
            stats.cells, samples_per_cell
        );
        if sink.wants(BakeEventKind::BakeStarted) {
            sink.send(BakeEvent::BakeStarted {
                geometry: *geometry,
                samples_per_axis: self.sampler.samples_per_axis(),
            });
        }

        for CellId(x, y) in geometry.cells() {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                warn!("Bake cancelled at cell ({}, {}).", x, y);
                return Err(Error::Cancelled);
            }

            let (max_height, hits) = self.bake_cell(geometry, x, y, provider);
            cache.set_max_height_at(x, y, max_height)?;

            stats.total_traces += samples_per_cell;
            stats.hits += hits as usize;
            if max_height.is_some() {
                stats.cells_with_hits += 1;
            }
            if sink.wants(BakeEventKind::CellBaked) {
                sink.send(BakeEvent::CellBaked {
                    cell: CellId(x, y),
                    max_height,
                    hits,
                });
            }
        }

        if stats.hits == 0 {
            let (top, bottom) = self.settings.trace_span();
            warn!(
                "No ray hit the terrain; check the trace span [{}, {}].",
                bottom, top
            );
            if sink.wants(BakeEventKind::Warning) {
                sink.send(BakeEvent::Warning {
                    context: "bake".into(),
                    message: format!("No ray hit the terrain in span [{bottom}, {top}]"),
                });
            }
        }

        info!(
            "Bake complete: cells={}, samples_per_cell={}, total_traces={}, hits={}",
            stats.cells, stats.samples_per_cell, stats.total_traces, stats.hits
        );
        if sink.wants(BakeEventKind::BakeFinished) {
            sink.send(BakeEvent::BakeFinished { stats });
        }

        Ok(BakeOutput { cache, stats })
    }

    /// Traces every sub-sample of cell `(x, y)`.
    ///
    /// Returns the highest hit elevation (or `None` if all rays missed) and the hit count.
    /// Non-finite hit elevations are treated as misses.
    pub fn bake_cell<P>(
        &self,
        geometry: &GridGeometry,
        x: usize,
        y: usize,
        provider: &mut P,
    ) -> (Option<f32>, u32)
    where
        P: IntersectionProvider + ?Sized,
    {
        let (top_z, bottom_z) = self.settings.trace_span();
        let cell_min = geometry.cell_min(x, y);

        let mut max_z: Option<f32> = None;
        let mut hits = 0u32;
        for p in self.sampler.sample_points(cell_min, geometry.cell_size) {
            let top = Vec3::new(p.x, p.y, top_z);
            let bottom = Vec3::new(p.x, p.y, bottom_z);
            let Some(hit) = provider.cast_vertical(top, bottom) else {
                continue;
            };
            if !hit.z.is_finite() {
                debug!("Ignoring non-finite hit at ({}, {}).", p.x, p.y);
                continue;
            }
            hits += 1;
            max_z = Some(max_z.map_or(hit.z, |m| m.max(hit.z)));
        }

        (max_z, hits)
    }
}

/// Bakes `geometry` with `settings` in one call.
pub fn bake<P>(
    geometry: &GridGeometry,
    settings: &BakeSettings,
    provider: &mut P,
) -> Result<HeightCache>
where
    P: IntersectionProvider + ?Sized,
{
    let baker = GridBaker::try_new(settings.clone())?;
    Ok(baker.bake(geometry, provider)?.cache)
}
