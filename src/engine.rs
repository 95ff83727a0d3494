//! Per-cell temporal smoothing: the engine that turns noisy, infrequently
//! polled raw counts into a continuously animated, visually stable field.
//!
//! The engine owns three parallel arrays (smoothed value, visibility,
//! rendered radius), allocated once and mutated in place. Two clocks drive
//! them: each ingested snapshot pulls `value` toward the latest raw counts,
//! and each animation tick advances `visibility` and `radius`. Every update
//! is an idempotent one-pole relaxation step, so the two cadences can
//! interleave freely without ever corrupting the state — a stale tick merely
//! delays convergence.

use egui::Color32;

use crate::config::{ConfigError, FadePolicy, HeatmapConfig, RadiusProfile};
use crate::snapshot::{decode_counts, BYTES_PER_CELL};

/// Activity threshold shared by the value gate (does visibility rise?) and
/// the visibility gate (is the cell rendered?).
pub const EPSILON: f64 = 1e-5;

/// Everything the render loop needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisual {
    pub col: usize,
    pub row: usize,
    /// Smoothed radius in reference pixels (pre-scaling).
    pub radius: f64,
    pub color: Color32,
    /// False while the cell's visibility sits at/below epsilon; such cells
    /// are skipped by the render loop and the field export. Independent of
    /// whether the value is zero — a cell keeps rendering while it fades out
    /// after its count has already dropped.
    pub drawn: bool,
}

/// The smoothing engine. See the module docs for the update model.
pub struct HeatmapEngine {
    config: HeatmapConfig,
    value: Vec<f64>,
    visibility: Vec<f64>,
    radius: Vec<f64>,
    /// Largest smoothed value scanned during the previous tick; this frame's
    /// normalization input (one-frame lag, latched below).
    latched_max: f64,
    /// Largest value scanned during the current tick, promoted to
    /// `latched_max` at the start of the next one.
    pending_max: f64,
}

impl HeatmapEngine {
    /// Validate `config` and allocate the per-cell arrays (value and
    /// visibility at zero, radius at the configured minimum). The arrays
    /// live for the lifetime of the engine and are never reallocated.
    pub fn new(config: HeatmapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cells = config.grid.cells();
        Ok(Self {
            value: vec![0.0; cells],
            visibility: vec![0.0; cells],
            radius: vec![config.radius.min; cells],
            latched_max: 0.0,
            pending_max: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// The normalization max currently in effect (previous frame's scan).
    pub fn latched_max(&self) -> f64 {
        self.latched_max
    }

    pub fn values(&self) -> &[f64] {
        &self.value
    }

    pub fn visibilities(&self) -> &[f64] {
        &self.visibility
    }

    pub fn radii(&self) -> &[f64] {
        &self.radius
    }

    /// Ingest a raw snapshot buffer. A buffer whose length is not exactly
    /// `cells * 4` is discarded (state untouched, returns false) — this
    /// guards against partial or corrupt transfers.
    pub fn ingest_raw(&mut self, bytes: &[u8]) -> bool {
        match decode_counts(bytes, self.value.len()) {
            Some(counts) => {
                self.smooth_toward(&counts);
                true
            }
            None => {
                log::warn!(
                    "discarding snapshot: got {} bytes, expected {}",
                    bytes.len(),
                    self.value.len() * BYTES_PER_CELL
                );
                false
            }
        }
    }

    /// Ingest an already-decoded snapshot. Length mismatches are discarded
    /// exactly like raw buffers of the wrong size.
    pub fn ingest_counts(&mut self, counts: &[u32]) -> bool {
        if counts.len() != self.value.len() {
            log::warn!(
                "discarding snapshot: got {} counts, expected {}",
                counts.len(),
                self.value.len()
            );
            return false;
        }
        self.smooth_toward(counts);
        true
    }

    // value[i] += (raw[i] - value[i]) * alpha_value. The coefficient is tied
    // to the nominal poll cadence, not to actual elapsed time.
    fn smooth_toward(&mut self, counts: &[u32]) {
        let alpha = self.config.smoothing.alpha_value;
        for (value, &raw) in self.value.iter_mut().zip(counts) {
            *value += (raw as f64 - *value) * alpha;
        }
    }

    /// Advance one animation frame: for every cell, update visibility (rise
    /// toward 1 while the value is above epsilon, otherwise fade per the
    /// configured policy), compute the piecewise-linear target radius, and
    /// relax the rendered radius toward it. Also rescans the running value
    /// maximum; the scan from the previous tick becomes this frame's
    /// normalization input.
    pub fn tick(&mut self) {
        self.latched_max = self.pending_max;
        let denominator = self.config.normalization.denominator(self.latched_max);
        let alpha_vis_up = self.config.smoothing.alpha_vis_up;
        let alpha_radius = self.config.smoothing.alpha_radius;
        let mut frame_max = 0.0_f64;
        for i in 0..self.value.len() {
            let value = self.value[i];
            if value > frame_max {
                frame_max = value;
            }
            if value > EPSILON {
                self.visibility[i] += (1.0 - self.visibility[i]) * alpha_vis_up;
            } else if let FadePolicy::Decay(decay) = self.config.fade {
                self.visibility[i] *= decay;
            }
            let target = if self.visibility[i] > EPSILON {
                self.target_radius(value, denominator)
            } else {
                self.config.radius.min
            };
            self.radius[i] += (target - self.radius[i]) * alpha_radius;
        }
        self.pending_max = frame_max;
    }

    // Piecewise-linear interpolation of value against the normalization
    // denominator: min → mid below it, mid → max above, saturating at max.
    fn target_radius(&self, value: f64, denominator: f64) -> f64 {
        let RadiusProfile { min, mid, max } = self.config.radius;
        if value < denominator {
            min + (mid - min) * (value / denominator)
        } else {
            let excess = value - denominator;
            (mid + (max - mid) * (excess / denominator)).min(max)
        }
    }

    /// Per-cell draw data for the current frame, in row-major order. Uses
    /// the same latched normalization denominator as the radius targets of
    /// the most recent [`tick`](Self::tick).
    pub fn visuals(&self) -> impl Iterator<Item = CellVisual> + '_ {
        let denominator = self.config.normalization.denominator(self.latched_max);
        let width = self.config.grid.width;
        (0..self.value.len()).map(move |i| {
            let visibility = self.visibility[i];
            CellVisual {
                col: i % width,
                row: i / width,
                radius: self.radius[i],
                color: self.config.ramp.shade(self.value[i], visibility, denominator),
                drawn: visibility > EPSILON,
            }
        })
    }
}
