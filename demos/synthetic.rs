//! Example: Synthetic drifting hotspots
//!
//! What it demonstrates
//! - Feeding the heatmap through `channel_snapshots()` and `spawn_poller`.
//! - A `SnapshotSource` implemented as a plain closure producing raw
//!   little-endian buffers, the same wire format a real endpoint serves.
//!
//! How to run
//! ```bash
//! cargo run --example synthetic
//! ```
//! You should see three hotspots orbiting the grid, fading in smoothly.

use liveheat::{channel_snapshots, run_heatmap, spawn_poller, FeedError, HeatmapConfig};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = HeatmapConfig::classic();
    let grid = config.grid;
    let (sink, rx) = channel_snapshots();

    // Three hotspots orbiting the grid center; counts fall off with distance.
    spawn_poller(
        move || -> Result<Vec<u8>, FeedError> {
            let t = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            let mut bytes = Vec::with_capacity(grid.cells() * 4);
            for y in 0..grid.height {
                for x in 0..grid.width {
                    let mut count = 0.0;
                    for k in 0..3 {
                        let phase = t * 0.2 + k as f64 * 2.1;
                        let cx = grid.width as f64 * (0.5 + 0.35 * phase.cos());
                        let cy = grid.height as f64 * (0.5 + 0.35 * (phase * 0.7).sin());
                        let d2 = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
                        count += 60.0 * (-d2 / 40.0).exp();
                    }
                    bytes.extend_from_slice(&(count as u32).to_le_bytes());
                }
            }
            Ok(bytes)
        },
        sink,
        config.poll_interval,
    );

    run_heatmap(rx, config)
}
