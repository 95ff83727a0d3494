//! Example: Preset tour
//!
//! What it demonstrates
//! - Looking up engine variants from the preset registry by name.
//! - A pulsing hotspot that switches off periodically, making the
//!   difference between the `Hold` and `Decay` fade policies visible.
//! - Observing per-frame stats through a `HeatmapController` subscription.
//!
//! How to run
//! ```bash
//! cargo run --example presets -- ember
//! ```
//! Pass `classic`, `ember` or `fixed-scale` (default: `ember`). With
//! `classic`, cells never fade back out once lit; with the other presets
//! they cool down and disappear a few seconds after the pulse ends.

use liveheat::{
    channel_snapshots, preset_named, preset_names, run_heatmap_with_options, spawn_poller,
    FeedError, HeatmapController,
};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "ember".to_string());
    let Some(config) = preset_named(&name) else {
        eprintln!(
            "unknown preset {name:?}; available: {}",
            preset_names().join(", ")
        );
        std::process::exit(2);
    };

    let grid = config.grid;
    let (sink, rx) = channel_snapshots();

    // One central hotspot, on for 4 seconds, off for 4 seconds.
    spawn_poller(
        move || -> Result<Vec<u8>, FeedError> {
            let t = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            let lit = (t / 4.0) as u64 % 2 == 0;
            let mut bytes = Vec::with_capacity(grid.cells() * 4);
            for y in 0..grid.height {
                for x in 0..grid.width {
                    let count = if lit {
                        let d2 = (x as f64 - grid.width as f64 / 2.0).powi(2)
                            + (y as f64 - grid.height as f64 / 2.0).powi(2);
                        (80.0 * (-d2 / 60.0).exp()) as u32
                    } else {
                        0
                    };
                    bytes.extend_from_slice(&count.to_le_bytes());
                }
            }
            Ok(bytes)
        },
        sink,
        config.poll_interval,
    );

    // Print frame stats roughly once per second.
    let controller = HeatmapController::new();
    let stats_rx = controller.subscribe();
    std::thread::spawn(move || {
        let mut last_print = Instant::now();
        while let Ok(stats) = stats_rx.recv() {
            if last_print.elapsed() >= Duration::from_secs(1) {
                println!(
                    "max {:.2}, {} cells drawn",
                    stats.latched_max, stats.drawn_cells
                );
                last_print = Instant::now();
            }
        }
    });

    run_heatmap_with_options(
        rx,
        config,
        eframe::NativeOptions::default(),
        Some(controller),
    )
}
