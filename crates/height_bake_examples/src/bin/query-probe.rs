use glam::{Vec2, Vec3};
use height_bake::prelude::*;
use height_bake_examples::{init_tracing, rolling_hills};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let terrain = StaticTerrain::new(
        Aabb::new(
            Vec3::new(0.0, 0.0, -500.0),
            Vec3::new(100_000.0, 100_000.0, 3_000.0),
        ),
        0.0,
    );
    let mut session = HeightBakeSession::new(GridConfig::new(100.0)).with_baseline(-500.0);
    session.build_grid(&terrain)?;

    let mut provider = HeightFieldProvider::new(rolling_hills);
    session.bake_terrain(&terrain, &mut provider)?;

    let probes = [
        Vec2::new(150.0, 150.0),
        Vec2::new(50_000.0, 42_000.0),
        Vec2::new(99_999.0, 99_999.0),
        Vec2::new(-10.0, 500.0),
    ];
    for p in probes {
        match session.query(p) {
            Ok(sample) => {
                if let Some(above) = sample.above_baseline {
                    tracing::info!("  {:.1} m above baseline", above);
                }
            }
            Err(Error::OutsideGrid { x, y }) => {
                tracing::warn!("({:.1}, {:.1}) is outside the baked grid", x, y);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let (Some(geometry), Some(cache)) = (session.geometry(), session.cache()) {
        let Some(window) = HeightProbe::cells_around(geometry, Vec2::new(150.0, 150.0), 2) else {
            return Ok(());
        };
        tracing::info!(
            "Window around first probe: {}x{} cells",
            window.width(),
            window.height()
        );
        for CellId(x, y) in window.cells() {
            tracing::info!("  cell ({}, {}) max_z={:?}", x, y, cache.max_height_at(x, y)?);
        }
    }
    Ok(())
}
