//! LiveHeat crate root: re-exports and module wiring.
//!
//! This crate provides a realtime animated heatmap widget built on
//! egui/eframe, driven by periodically polled snapshots of per-cell counts:
//! - `snapshot`: decoding and the channel used to feed snapshots to the UI
//! - `feed`: the abstract snapshot source and the fixed-interval poller
//! - `engine`: per-cell exponential smoothing of value/visibility/radius
//! - `color`: intensity/visibility → color mapping
//! - `config`: configuration, validation, and the variant presets
//! - `controllers`: external pause/resume control and frame stats
//! - `app`: the eframe render loop and run helpers

pub mod app;
pub mod color;
pub mod config;
pub mod controllers;
pub mod engine;
#[cfg(feature = "export")]
pub mod export;
pub mod feed;
pub mod snapshot;

// Public re-exports for a compact external API
pub use app::{run_heatmap, run_heatmap_with_options, HeatmapApp};
pub use color::ColorRamp;
pub use config::{
    preset_named, preset_names, register_preset, ConfigError, FadePolicy, GridSpec,
    HeatmapConfig, Normalization, RadiusProfile, Smoothing,
};
pub use controllers::{FrameStats, HeatmapController};
pub use engine::{CellVisual, HeatmapEngine, EPSILON};
pub use feed::{spawn_poller, FeedError, SnapshotSource};
pub use snapshot::{channel_snapshots, decode_counts, FeedCommand, SnapshotSink};
