//! Snapshot decoding and the channel used to feed snapshots into the UI.
//!
//! Producers (a poller thread, a replay loop, test code) push either raw
//! byte buffers or pre-decoded count arrays through a [`SnapshotSink`]; the
//! UI drains the receiving end once per frame and hands the payloads to the
//! engine. The engine — not the producer — owns length validation, so a
//! misbehaving source can at worst cause discarded snapshots.

use std::sync::mpsc::{Receiver, SendError, Sender};

/// Wire width of one cell count: unsigned 32-bit little-endian.
pub const BYTES_PER_CELL: usize = 4;

/// Decode a raw snapshot buffer into per-cell counts (row-major, u32 LE).
/// Returns `None` unless the buffer is exactly `cells * 4` bytes.
pub fn decode_counts(bytes: &[u8], cells: usize) -> Option<Vec<u32>> {
    if bytes.len() != cells * BYTES_PER_CELL {
        return None;
    }
    Some(
        bytes
            .chunks_exact(BYTES_PER_CELL)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}

/// Messages sent over the feed channel to the UI.
pub enum FeedCommand {
    /// A raw snapshot buffer as fetched from the data source.
    Raw(Vec<u8>),
    /// An already-decoded snapshot, one count per cell in row-major order.
    Counts(Vec<u32>),
}

/// Convenience sender for pushing snapshots toward the heatmap UI.
#[derive(Clone)]
pub struct SnapshotSink {
    tx: Sender<FeedCommand>,
}

impl SnapshotSink {
    /// Send a raw snapshot buffer. Errors only when the UI side hung up.
    pub fn send_raw(&self, bytes: Vec<u8>) -> Result<(), SendError<FeedCommand>> {
        self.tx.send(FeedCommand::Raw(bytes))
    }

    /// Send pre-decoded counts. Errors only when the UI side hung up.
    pub fn send_counts<I>(&self, counts: I) -> Result<(), SendError<FeedCommand>>
    where
        I: Into<Vec<u32>>,
    {
        self.tx.send(FeedCommand::Counts(counts.into()))
    }
}

/// Create a new feed channel pair: `(SnapshotSink, Receiver<FeedCommand>)`.
pub fn channel_snapshots() -> (SnapshotSink, Receiver<FeedCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (SnapshotSink { tx }, rx)
}
