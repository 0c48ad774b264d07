use glam::Vec3;
use height_bake::prelude::*;
use height_bake_examples::{init_tracing, render_cache_to_png, rolling_hills, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let geometry = GridBuilder::build(
        Vec3::new(-50_000.0, -50_000.0, 0.0),
        Vec3::new(50_000.0, 50_000.0, 0.0),
        5_000.0,
        0.0,
    )?;

    let levels = [1_u32, 2, 4, 8];
    let mut range: Option<(f32, f32)> = None;
    let mut caches = Vec::with_capacity(levels.len());

    for n in levels {
        let settings = BakeSettings::new(n);
        let mut provider = HeightFieldProvider::new(rolling_hills);
        let output = GridBaker::try_new(settings)?.bake(&geometry, &mut provider)?;

        let sampled: Vec<f32> = output.cache.max_heights().iter().flatten().copied().collect();
        let mean = sampled.iter().sum::<f32>() / sampled.len().max(1) as f32;
        tracing::info!(
            "samples_per_axis={} traces={} mean max height={:.1} m",
            n,
            output.stats.total_traces,
            cm_to_meters(mean)
        );

        if let Some((lo, hi)) = output.cache.height_range() {
            range = Some(match range {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
        }
        caches.push((n, output.cache));
    }

    // Shared color scale so the images are comparable.
    let mut config = RenderConfig::new(16);
    if let Some((lo, hi)) = range {
        config = config.with_height_range(lo, hi);
    }
    for (n, cache) in &caches {
        render_cache_to_png(cache, &config, &format!("bake-sampling-density-{n}.png"))?;
    }
    Ok(())
}
