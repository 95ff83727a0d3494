//! Configuration types shared across the heatmap engine and UI.

use std::sync::Mutex;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorRamp;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Rejected configuration. This is the only fatal error class in the crate:
/// it is raised at startup, before any recurrence runs, so divergent or
/// NaN-producing coefficient combinations never reach the engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },
    #[error("{name} must lie in (0, 1] (got {value})")]
    CoefficientOutOfRange { name: &'static str, value: f64 },
    #[error("visibility decay factor must lie in (0, 1) (got {0})")]
    DecayOutOfRange(f64),
    #[error("radius profile must satisfy 0 <= min <= mid <= max with max > 0 (got {min}/{mid}/{max})")]
    RadiusProfile { min: f64, mid: f64, max: f64 },
    #[error("{name} must be strictly positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("poll interval must be non-zero")]
    ZeroPollInterval,
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable rectangular cell lattice, indexed `x + y * width`, row-major.
/// Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
}

impl GridSpec {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total cell count (`width * height`).
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Flat row-major index of `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Radius profile
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered-radius bounds and breakpoint, in reference pixels (pre-scaling).
///
/// The per-frame target radius interpolates `min → mid` while the cell's
/// value is below the normalization denominator and `mid → max` above it,
/// saturating at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusProfile {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

impl Default for RadiusProfile {
    fn default() -> Self {
        Self { min: 2.0, mid: 5.0, max: 7.5 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Smoothing coefficients
// ─────────────────────────────────────────────────────────────────────────────

/// One-pole exponential smoothing weights, each in (0, 1].
///
/// These are tied to the nominal tick cadences (value to the poll interval,
/// the rest to the animation frame) and are NOT corrected for actual elapsed
/// time between ticks; if the cadence drifts, the effective time constant
/// drifts with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smoothing {
    /// Weight pulling a cell's value toward the latest raw count, applied
    /// once per ingested snapshot.
    pub alpha_value: f64,
    /// Weight pulling visibility toward 1 while the cell is active, applied
    /// once per frame.
    pub alpha_vis_up: f64,
    /// Weight pulling the rendered radius toward its per-frame target.
    pub alpha_radius: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self { alpha_value: 0.01, alpha_vis_up: 0.01, alpha_radius: 0.25 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fade policy
// ─────────────────────────────────────────────────────────────────────────────

/// What happens to a cell's visibility while its value sits at/below epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FadePolicy {
    /// Visibility only ever rises. A cell that was active once keeps
    /// rendering until its value becomes positive again (it never does if
    /// the feed stays at zero).
    Hold,
    /// Visibility decays multiplicatively by this factor per frame, in
    /// (0, 1). Typically much slower than the rise coefficient.
    Decay(f64),
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the denominator dividing cell values into dimensionless
/// intensities for color and radius mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    /// A fixed constant, for feeds with a known magnitude scale.
    Fixed(f64),
    /// `latched_max / divisor`, adapting to the current load scale. The max
    /// is the largest smoothed value observed over the previous frame.
    DynamicMax { divisor: f64 },
}

impl Normalization {
    /// Resolve the denominator for one frame. A non-positive latched max
    /// (startup, or an all-zero field) resolves to a unit denominator so the
    /// mapping stays finite.
    pub fn denominator(&self, latched_max: f64) -> f64 {
        match *self {
            Normalization::Fixed(denom) => denom,
            Normalization::DynamicMax { divisor } => {
                if latched_max > 0.0 {
                    latched_max / divisor
                } else {
                    1.0
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HeatmapConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration, fixed at engine construction.
///
/// | Field             | Purpose |
/// |-------------------|---------|
/// | `grid`            | Cell lattice dimensions |
/// | `spacing`         | Cell spacing x/y in reference pixels |
/// | `radius`          | Rendered-radius bounds and breakpoint |
/// | `smoothing`       | Exponential smoothing coefficients |
/// | `fade`            | Visibility decay policy |
/// | `normalization`   | Intensity denominator strategy |
/// | `ramp`            | Per-channel color constants |
/// | `background`      | Surface clear color |
/// | `reference_width` | Denominator of the responsive scale factor |
/// | `poll_interval`   | Feed cadence hint for [`crate::feed::spawn_poller`] |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub grid: GridSpec,
    pub spacing: [f64; 2],
    pub radius: RadiusProfile,
    pub smoothing: Smoothing,
    pub fade: FadePolicy,
    pub normalization: Normalization,
    pub ramp: ColorRamp,
    pub background: [u8; 3],
    pub reference_width: f64,
    pub poll_interval: Duration,
    /// Native window title used by the run helpers.
    pub title: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl HeatmapConfig {
    /// The observed-source constants: 120×64 world grid, dynamic-max
    /// normalization, visibility that only ever rises.
    pub fn classic() -> Self {
        Self {
            grid: GridSpec::new(120, 64),
            spacing: [16.0, 16.0],
            radius: RadiusProfile::default(),
            smoothing: Smoothing::default(),
            fade: FadePolicy::Hold,
            normalization: Normalization::DynamicMax { divisor: 10.0 },
            ramp: ColorRamp::default(),
            background: [15, 15, 15],
            reference_width: 1900.0,
            poll_interval: Duration::from_millis(10),
            title: "LiveHeat".to_string(),
        }
    }

    /// Warm ramp with multiplicative fade-out: cells cool down and disappear
    /// once their counts drop to zero.
    pub fn ember() -> Self {
        Self {
            smoothing: Smoothing { alpha_vis_up: 0.02, ..Smoothing::default() },
            fade: FadePolicy::Decay(0.99),
            ramp: ColorRamp { gain: [255.0, 140.0, 50.0], ..ColorRamp::default() },
            title: "LiveHeat (ember)".to_string(),
            ..Self::classic()
        }
    }

    /// Fixed normalization denominator for feeds with a known magnitude
    /// scale, with fade-out.
    pub fn fixed_scale() -> Self {
        Self {
            fade: FadePolicy::Decay(0.99),
            normalization: Normalization::Fixed(32.0),
            title: "LiveHeat (fixed scale)".to_string(),
            ..Self::classic()
        }
    }

    /// Check every constraint the recurrences depend on. Called by
    /// [`crate::engine::HeatmapEngine::new`]; callers constructing configs
    /// from external input should call it directly for early diagnostics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        for (name, value) in [
            ("cell spacing x", self.spacing[0]),
            ("cell spacing y", self.spacing[1]),
            ("reference width", self.reference_width),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("alpha_value", self.smoothing.alpha_value),
            ("alpha_vis_up", self.smoothing.alpha_vis_up),
            ("alpha_radius", self.smoothing.alpha_radius),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(ConfigError::CoefficientOutOfRange { name, value });
            }
        }
        if let FadePolicy::Decay(decay) = self.fade {
            if decay <= 0.0 || decay >= 1.0 {
                return Err(ConfigError::DecayOutOfRange(decay));
            }
        }
        let RadiusProfile { min, mid, max } = self.radius;
        if !(0.0 <= min && min <= mid && mid <= max && max > 0.0) {
            return Err(ConfigError::RadiusProfile { min, mid, max });
        }
        match self.normalization {
            Normalization::Fixed(denom) if denom <= 0.0 => {
                return Err(ConfigError::NonPositive {
                    name: "fixed normalization denominator",
                    value: denom,
                });
            }
            Normalization::DynamicMax { divisor } if divisor <= 0.0 => {
                return Err(ConfigError::NonPositive {
                    name: "dynamic normalization divisor",
                    value: divisor,
                });
            }
            _ => {}
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Map a pointer position (relative to the surface origin, in surface
    /// pixels) back to the nearest grid cell, undoing the responsive scale
    /// factor. Returns `None` outside the grid.
    pub fn cell_at(&self, rel_x: f64, rel_y: f64, scale: f64) -> Option<(usize, usize)> {
        if scale <= 0.0 {
            return None;
        }
        let gx = (rel_x / scale / self.spacing[0]).round();
        let gy = (rel_y / scale / self.spacing[1]).round();
        if gx < 0.0 || gy < 0.0 {
            return None;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        (gx < self.grid.width && gy < self.grid.height).then_some((gx, gy))
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preset registry
// ─────────────────────────────────────────────────────────────────────────────

// Global registry of named presets. Seeded with the built-in variants; user
// code may register its own via `register_preset`.
static PRESETS: Lazy<Mutex<Vec<(String, HeatmapConfig)>>> = Lazy::new(|| {
    Mutex::new(vec![
        ("classic".to_string(), HeatmapConfig::classic()),
        ("ember".to_string(), HeatmapConfig::ember()),
        ("fixed-scale".to_string(), HeatmapConfig::fixed_scale()),
    ])
});

/// Look up a preset by name. Built-ins: `classic`, `ember`, `fixed-scale`.
pub fn preset_named(name: &str) -> Option<HeatmapConfig> {
    PRESETS
        .lock()
        .unwrap()
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, config)| config.clone())
}

/// Register (or replace) a named preset.
pub fn register_preset<S: Into<String>>(name: S, config: HeatmapConfig) {
    let name = name.into();
    let mut registry = PRESETS.lock().unwrap();
    if let Some(slot) = registry.iter_mut().find(|(n, _)| *n == name) {
        slot.1 = config;
    } else {
        registry.push((name, config));
    }
}

/// Names of all registered presets, in registration order.
pub fn preset_names() -> Vec<String> {
    PRESETS.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
}
