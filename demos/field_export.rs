//! Example: Headless field export
//!
//! What it demonstrates
//! - Driving `HeatmapEngine` directly, without any UI: ingest snapshots,
//!   advance animation ticks, then rasterize the field to a PNG.
//!
//! How to run
//! ```bash
//! cargo run --example field_export
//! ```
//! Writes `liveheat_field.png` (one pixel per grid cell) to the current
//! directory.

use liveheat::{export::field_image, HeatmapConfig, HeatmapEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut engine = HeatmapEngine::new(HeatmapConfig::ember())?;
    let grid = engine.config().grid;

    // A diagonal band of activity across the grid.
    let mut counts = vec![0u32; grid.cells()];
    for y in 0..grid.height {
        for x in 0..grid.width {
            let band = (x as f64 / grid.width as f64 - y as f64 / grid.height as f64).abs();
            if band < 0.12 {
                counts[grid.index(x, y)] = (90.0 * (1.0 - band / 0.12)) as u32;
            }
        }
    }

    // Let value, visibility and radius settle toward the feed.
    for _ in 0..400 {
        engine.ingest_counts(&counts);
        engine.tick();
    }

    let image = field_image(&engine);
    let path = "liveheat_field.png";
    image.save(path)?;
    println!("wrote {path} ({}x{})", image.width(), image.height());
    Ok(())
}
