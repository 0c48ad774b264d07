//! PNG rendering of baked height caches and tracing setup for the example binaries.
use anyhow::{bail, Context};
use height_bake::prelude::*;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Colors and scale used when rendering a [`HeightCache`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Square pixel block drawn per cell.
    pub pixels_per_cell: u32,
    /// Color for the lowest height in range.
    pub low: [u8; 3],
    /// Color for the highest height in range.
    pub high: [u8; 3],
    /// Color for cells where no ray hit the terrain.
    pub unsampled: [u8; 3],
    /// Fixed `(min, max)` height range; defaults to the cache's own range.
    pub height_range: Option<(f32, f32)>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_cell: 8,
            low: [20, 40, 30],
            high: [235, 240, 225],
            unsampled: [200, 40, 160],
            height_range: None,
        }
    }
}

impl RenderConfig {
    pub fn new(pixels_per_cell: u32) -> Self {
        Self {
            pixels_per_cell,
            ..Default::default()
        }
    }

    pub fn with_colors(mut self, low: [u8; 3], high: [u8; 3]) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn with_height_range(mut self, min: f32, max: f32) -> Self {
        self.height_range = Some((min, max));
        self
    }

    fn color_for(&self, height: Option<f32>, (lo, hi): (f32, f32)) -> Rgb<u8> {
        let Some(z) = height else {
            return Rgb(self.unsampled);
        };
        let t = if hi > lo {
            ((z - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb([
            mix(self.low[0], self.high[0]),
            mix(self.low[1], self.high[1]),
            mix(self.low[2], self.high[2]),
        ])
    }
}

/// Renders `cache` as a top-down PNG with +Y pointing up.
pub fn render_cache_to_png(
    cache: &HeightCache,
    config: &RenderConfig,
    out_path: &str,
) -> anyhow::Result<()> {
    cache.validate()?;
    if config.pixels_per_cell == 0 {
        bail!("pixels_per_cell must be > 0");
    }

    let (rx, ry) = cache.resolution();
    let ppc = config.pixels_per_cell;
    let width = u32::try_from(rx)?
        .checked_mul(ppc)
        .context("image width overflows")?;
    let height = u32::try_from(ry)?
        .checked_mul(ppc)
        .context("image height overflows")?;

    let range = config
        .height_range
        .or_else(|| cache.height_range())
        .unwrap_or((0.0, 1.0));

    let mut img = RgbImage::new(width, height);
    for CellId(x, y) in cache.geometry().cells() {
        let color = config.color_for(cache.max_height_at(x, y)?, range);
        let px0 = x as u32 * ppc;
        let py0 = (ry - 1 - y) as u32 * ppc;
        for py in py0..py0 + ppc {
            for px in px0..px0 + ppc {
                img.put_pixel(px, py, color);
            }
        }
    }

    img.save(out_path)
        .with_context(|| format!("failed to write {out_path}"))?;
    tracing::info!("Wrote {} ({}x{} px)", out_path, width, height);
    Ok(())
}
