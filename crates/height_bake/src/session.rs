//! Stateful build → bake → query flow.
//!
//! [`HeightBakeSession`] keeps the configuration, the built geometry and the last
//! successful cache together. Terrain and intersection providers are passed in per
//! call. A failed step never replaces the state produced by an earlier successful one.
use glam::Vec2;
use tracing::{debug, warn};

use crate::bake::{
    BakeSettings, BakeStats, CancelFlag, EventSink, GridBaker, IntersectionProvider,
};
use crate::cache::HeightCache;
use crate::error::{Error, Result};
use crate::grid::{GridBuilder, GridConfig, GridGeometry};
use crate::query::{HeightProbe, HeightSample};
use crate::terrain::TerrainSource;

/// Owns the grid geometry and baked cache for one terrain.
#[derive(Debug, Clone, Default)]
pub struct HeightBakeSession {
    config: GridConfig,
    baseline: f32,
    geometry: Option<GridGeometry>,
    cache: Option<HeightCache>,
    stats: Option<BakeStats>,
    cancel: Option<CancelFlag>,
}

impl HeightBakeSession {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Sets the baseline applied to caches baked by this session.
    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        if let Some(cache) = self.cache.as_mut() {
            cache.set_baseline(baseline);
        }
        self
    }

    /// Attaches a cancellation flag forwarded to every bake.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn cache(&self) -> Option<&HeightCache> {
        self.cache.as_ref()
    }

    /// Statistics of the last successful bake.
    pub fn stats(&self) -> Option<&BakeStats> {
        self.stats.as_ref()
    }

    /// Removes and returns the baked cache.
    pub fn take_cache(&mut self) -> Option<HeightCache> {
        self.stats = None;
        self.cache.take()
    }

    /// Computes the grid geometry covering `terrain`.
    ///
    /// A new geometry invalidates any cache baked for the previous one.
    pub fn build_grid(&mut self, terrain: &dyn TerrainSource) -> Result<&GridGeometry> {
        let geometry = match GridBuilder::build_for_terrain(terrain, &self.config) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!("Build grid failed: {}.", e);
                return Err(e);
            }
        };

        if self.geometry.as_ref() != Some(&geometry) {
            self.cache = None;
            self.stats = None;
        }
        Ok(&*self.geometry.insert(geometry))
    }

    /// Bakes the built grid, measuring trace spans from `reference_z`.
    pub fn bake<P>(&mut self, reference_z: f32, provider: &mut P) -> Result<&BakeStats>
    where
        P: IntersectionProvider + ?Sized,
    {
        self.bake_with_events(reference_z, provider, &mut ())
    }

    /// Bakes the built grid, reporting progress to `sink`.
    pub fn bake_with_events<P>(
        &mut self,
        reference_z: f32,
        provider: &mut P,
        sink: &mut dyn EventSink,
    ) -> Result<&BakeStats>
    where
        P: IntersectionProvider + ?Sized,
    {
        let Some(geometry) = self.geometry else {
            warn!("Bake failed: grid not built.");
            return Err(Error::NotBuilt);
        };

        let settings = BakeSettings::from_config(&self.config, reference_z);
        let mut baker = GridBaker::try_new(settings)?;
        if let Some(flag) = &self.cancel {
            baker = baker.with_cancel_flag(flag.clone());
        }

        let output = match baker.bake_with_events(&geometry, provider, sink) {
            Ok(output) => output,
            Err(e) => {
                warn!("Bake failed: {}. Keeping previous cache.", e);
                return Err(e);
            }
        };

        let mut cache = output.cache;
        cache.set_baseline(self.baseline);
        self.cache = Some(cache);
        Ok(&*self.stats.insert(output.stats))
    }

    /// Bakes using the terrain's own anchor elevation as the trace reference.
    pub fn bake_terrain<P>(
        &mut self,
        terrain: &dyn TerrainSource,
        provider: &mut P,
    ) -> Result<&BakeStats>
    where
        P: IntersectionProvider + ?Sized,
    {
        self.bake(terrain.anchor_elevation(), provider)
    }

    /// Probes the baked cache at a world position.
    pub fn query(&self, p: impl Into<Vec2>) -> Result<HeightSample> {
        if self.geometry.is_none() {
            return Err(Error::NotBuilt);
        }
        let cache = self.cache.as_ref().ok_or(Error::NotBaked)?;
        let sample = HeightProbe::query(cache, p)?;
        debug!(
            "Query @ ({:.1}, {:.1}) -> cell ({}, {}) -> max_z={:?}",
            sample.position.x,
            sample.position.y,
            sample.cell.0,
            sample.cell.1,
            sample.max_height
        );
        Ok(sample)
    }
}
