//! Color mapping for heatmap cells.
//!
//! A [`ColorRamp`] turns a cell's smoothed value and visibility into an
//! [`egui::Color32`]. The ramp is a per-channel affine table: each channel
//! rises with intensity at its own gain, producing a cool-to-warm sweep as a
//! cell heats up, scaled by the cell's fade-in level. Channel outputs are
//! clamped to the displayable range; the mapping never produces out-of-range
//! components regardless of how large the intensity gets.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Per-channel constants mapping `(value, visibility)` to a fill color.
///
/// The channel formula is
/// `base_level + visibility * (offset[c] + gain[c] * (floor + intensity_weight * intensity))`
/// with `intensity = value / denominator`, clamped to `0..=255`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Channel level of a fully faded-out cell. Matches the background level
    /// so cells melt into the backdrop as they fade.
    pub base_level: f64,
    /// Per-channel additive offset, applied under the visibility scale.
    pub offset: [f64; 3],
    /// Per-channel intensity gain (r/g/b). Distinct gains produce the
    /// cool-to-warm sweep.
    pub gain: [f64; 3],
    /// Baseline fraction of the gain that applies even at zero intensity,
    /// so barely-active cells are still distinguishable from the backdrop.
    pub floor: f64,
    /// Weight of the normalized intensity inside the gain term.
    pub intensity_weight: f64,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            base_level: 15.0,
            offset: [25.0, 25.0, 25.0],
            gain: [75.0, 170.0, 255.0],
            floor: 0.25,
            intensity_weight: 1.0,
        }
    }
}

impl ColorRamp {
    /// Shade one cell. `denominator` is the normalization denominator for
    /// this frame (see [`crate::config::Normalization::denominator`]); it is
    /// strictly positive by construction.
    pub fn shade(&self, value: f64, visibility: f64, denominator: f64) -> Color32 {
        let intensity = value / denominator;
        let mut rgb = [0u8; 3];
        for (c, out) in rgb.iter_mut().enumerate() {
            let level = self.base_level
                + visibility
                    * (self.offset[c]
                        + self.gain[c] * (self.floor + self.intensity_weight * intensity));
            *out = level.clamp(0.0, 255.0) as u8;
        }
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}
