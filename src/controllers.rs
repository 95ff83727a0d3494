//! Controller for interacting with the heatmap UI from external code.
//!
//! The controller exposes lightweight pause/resume requests and a
//! subscription mechanism so non-UI code can observe per-frame statistics
//! without touching the engine directly.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

/// Per-frame statistics published to subscribers.
#[derive(Debug, Clone)]
pub struct FrameStats {
    /// The normalization max in effect for the frame (previous frame's scan).
    pub latched_max: f64,
    /// Number of cells that were actually drawn.
    pub drawn_cells: usize,
    /// Wall-clock time of the last successfully ingested snapshot, if any.
    pub last_snapshot: Option<DateTime<Local>>,
}

/// Controller to pause/resume the animation and subscribe to frame stats.
#[derive(Clone)]
pub struct HeatmapController {
    pub(crate) inner: Arc<Mutex<CtrlInner>>, // crate-visible for the UI
}

pub(crate) struct CtrlInner {
    pub(crate) request_pause: Option<bool>,
    pub(crate) listeners: Vec<Sender<FrameStats>>,
}

impl HeatmapController {
    /// Create a fresh controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CtrlInner {
                request_pause: None,
                listeners: Vec::new(),
            })),
        }
    }

    /// Request the UI to pause: the field freezes and incoming snapshots are
    /// discarded until resumed.
    pub fn pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.request_pause = Some(true);
    }

    /// Request the UI to resume live updates.
    pub fn resume(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.request_pause = Some(false);
    }

    /// Subscribe to frame statistics. The returned receiver gets one
    /// [`FrameStats`] per rendered frame.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<FrameStats> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.push(tx);
        rx
    }

    /// Publish stats for the frame just rendered; dead listeners are pruned.
    pub(crate) fn publish(&self, stats: &FrameStats) {
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.retain(|s| s.send(stats.clone()).is_ok());
    }
}
