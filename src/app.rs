//! Heatmap UI: egui/eframe app that drains the snapshot feed and animates
//! the field.
//!
//! Both clocks meet here, serialized onto the UI thread: pending snapshots
//! are ingested at the top of every frame, then the engine advances one
//! animation tick and the field is repainted. The repaint is re-scheduled at
//! a fixed rate, so the animation keeps running whether or not data arrives.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use chrono::{DateTime, Local};
use eframe::{self, egui};
use egui::{Color32, Shape};

use crate::config::{ConfigError, HeatmapConfig};
use crate::controllers::{FrameStats, HeatmapController};
use crate::engine::HeatmapEngine;
use crate::snapshot::FeedCommand;

/// Egui app that renders one heatmap engine fed from a snapshot channel.
pub struct HeatmapApp {
    pub rx: Receiver<FeedCommand>,
    engine: HeatmapEngine,
    pub paused: bool,
    /// Optional controller for pause/resume requests and frame stats.
    pub controller: Option<HeatmapController>,
    last_snapshot: Option<DateTime<Local>>,
    hovered: Option<(usize, usize)>,
}

impl HeatmapApp {
    /// Build the app around a fresh engine. Fails fast on invalid
    /// configuration, before any window opens.
    pub fn new(rx: Receiver<FeedCommand>, config: HeatmapConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rx,
            engine: HeatmapEngine::new(config)?,
            paused: false,
            controller: None,
            last_snapshot: None,
            hovered: None,
        })
    }

    /// Attach a controller.
    pub fn with_controller(mut self, controller: HeatmapController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn engine(&self) -> &HeatmapEngine {
        &self.engine
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.engine.config().title);
            ui.separator();
            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            ui.label(format!("max {:.1}", self.engine.latched_max()));
            match &self.last_snapshot {
                Some(t) => ui.label(format!("last snapshot {}", t.format("%H:%M:%S"))),
                None => ui.label("no data yet"),
            };
            if let Some((col, row)) = self.hovered {
                let index = self.engine.config().grid.index(col, row);
                ui.label(format!(
                    "cell ({col},{row}): {:.2}",
                    self.engine.values()[index]
                ));
            }
        });
    }
}

impl eframe::App for HeatmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply controller requests first so a pause takes effect this frame.
        if let Some(ctrl) = &self.controller {
            if let Some(pause) = ctrl.inner.lock().unwrap().request_pause.take() {
                self.paused = pause;
            }
        }

        // Ingest pending snapshots. While paused the channel is still
        // drained (and the payloads discarded) so the producer never backs
        // up behind a frozen UI.
        while let Ok(cmd) = self.rx.try_recv() {
            if self.paused {
                continue;
            }
            let applied = match cmd {
                FeedCommand::Raw(bytes) => self.engine.ingest_raw(&bytes),
                FeedCommand::Counts(counts) => self.engine.ingest_counts(&counts),
            };
            if applied {
                self.last_snapshot = Some(Local::now());
            }
        }

        if !self.paused {
            self.engine.tick();
        }

        egui::TopBottomPanel::top("heatmap_status").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        let mut drawn_cells = 0usize;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let painter = ui.painter();

                let config = self.engine.config();
                let [bg_r, bg_g, bg_b] = config.background;
                painter.rect_filled(
                    rect,
                    egui::CornerRadius::ZERO,
                    Color32::from_rgb(bg_r, bg_g, bg_b),
                );

                // Responsive scale: the whole grid follows the surface width
                // without any layout recomputation.
                let scale = rect.width() as f64 / config.reference_width;
                let [spacing_x, spacing_y] = config.spacing;

                let mut shapes = Vec::with_capacity(config.grid.cells());
                for cell in self.engine.visuals() {
                    if !cell.drawn {
                        continue;
                    }
                    drawn_cells += 1;
                    let center = egui::pos2(
                        rect.left() + (cell.col as f64 * spacing_x * scale) as f32,
                        rect.top() + (cell.row as f64 * spacing_y * scale) as f32,
                    );
                    shapes.push(Shape::circle_filled(
                        center,
                        (cell.radius * scale) as f32,
                        cell.color,
                    ));
                }
                painter.extend(shapes);

                // Pointer position translated back into grid space.
                self.hovered = response.hover_pos().and_then(|pos| {
                    let rel = pos - rect.min;
                    config.cell_at(rel.x as f64, rel.y as f64, scale)
                });
            });

        if let Some(ctrl) = &self.controller {
            ctrl.publish(&FrameStats {
                latched_max: self.engine.latched_max(),
                drawn_cells,
                last_snapshot: self.last_snapshot,
            });
        }

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

/// Run the heatmap UI until the window closes, with default native options.
pub fn run_heatmap(rx: Receiver<FeedCommand>, config: HeatmapConfig) -> eframe::Result<()> {
    run_heatmap_with_options(rx, config, eframe::NativeOptions::default(), None)
}

/// Run the heatmap UI with explicit native options and an optional
/// controller. Configuration errors surface as app-creation failures.
pub fn run_heatmap_with_options(
    rx: Receiver<FeedCommand>,
    config: HeatmapConfig,
    native_options: eframe::NativeOptions,
    controller: Option<HeatmapController>,
) -> eframe::Result<()> {
    let title = config.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| {
            let mut app = HeatmapApp::new(rx, config)?;
            if let Some(ctrl) = controller {
                app = app.with_controller(ctrl);
            }
            Ok(Box::new(app))
        }),
    )
}
