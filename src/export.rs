//! Render the smoothed field into an image, one pixel per cell.
//!
//! Uses the same visual mapping as the live view, so an exported frame looks
//! like a downscaled screenshot of the widget. Cells that would not be drawn
//! take the background color.

use image::{Rgba, RgbaImage};

use crate::engine::HeatmapEngine;

/// Rasterize the engine's current field. Dimensions are the grid dimensions.
pub fn field_image(engine: &HeatmapEngine) -> RgbaImage {
    let grid = engine.config().grid;
    let [bg_r, bg_g, bg_b] = engine.config().background;
    let mut image = RgbaImage::from_pixel(
        grid.width as u32,
        grid.height as u32,
        Rgba([bg_r, bg_g, bg_b, 255]),
    );
    for cell in engine.visuals() {
        if !cell.drawn {
            continue;
        }
        image.put_pixel(
            cell.col as u32,
            cell.row as u32,
            Rgba([cell.color.r(), cell.color.g(), cell.color.b(), 255]),
        );
    }
    image
}
