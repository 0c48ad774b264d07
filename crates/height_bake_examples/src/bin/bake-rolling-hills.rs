use glam::{Vec2, Vec3};
use height_bake::prelude::*;
use height_bake_examples::{init_tracing, render_cache_to_png, HillField, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 2 km x 2 km landscape, heights in centimeters.
    let bounds = Aabb::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(200_000.0, 200_000.0, 4_000.0),
    );
    let terrain = StaticTerrain::new(bounds, 0.0);
    let field = HillField::random(bounds, 200.0, 24, 7);

    // Padding pushes a ring of cells past the terrain edge; they stay unsampled.
    let config = GridConfig::new(50.0)
        .with_padding_meters(100.0)
        .with_samples_per_axis(3);
    let mut session = HeightBakeSession::new(config).with_baseline(200.0);

    let geometry = *session.build_grid(&terrain)?;
    tracing::info!(
        "Grid origin=({:.0}, {:.0}) resolution={:?}",
        geometry.origin.x,
        geometry.origin.y,
        geometry.resolution
    );

    let mut provider = HeightFieldProvider::new(|p: Vec2| field.elevation(p));
    let stats = *session.bake_terrain(&terrain, &mut provider)?;
    let unsampled = stats.cells - stats.cells_with_hits;
    tracing::info!("{} of {} cells unsampled", unsampled, stats.cells);

    let cache = session
        .take_cache()
        .ok_or_else(|| anyhow::anyhow!("bake produced no cache"))?;
    if let Some((lo, hi)) = cache.height_range() {
        tracing::info!(
            "Height range {:.1} m .. {:.1} m",
            cm_to_meters(lo),
            cm_to_meters(hi)
        );
    }

    render_cache_to_png(&cache, &RenderConfig::new(12), "bake-rolling-hills.png")?;
    Ok(())
}
