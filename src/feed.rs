//! Background polling of an abstract snapshot source.
//!
//! The transport itself (HTTP or otherwise) lives behind the
//! [`SnapshotSource`] trait; this module only supplies the fixed-interval
//! polling loop. A failed or empty fetch is a skipped tick — no retry, no
//! backoff, the next tick simply tries again — so a slow or flapping source
//! only ever costs data freshness, never the animation.

use std::time::Duration;

use thiserror::Error;

use crate::snapshot::SnapshotSink;

/// Fetch failure for one poll tick.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("empty payload")]
    Empty,
}

/// An abstract snapshot endpoint: one fetch per poll tick, returning the raw
/// buffer for the whole grid.
pub trait SnapshotSource: Send + 'static {
    fn fetch(&mut self) -> Result<Vec<u8>, FeedError>;
}

/// Any `FnMut() -> Result<Vec<u8>, FeedError>` is a source; handy for tests
/// and synthetic demos.
impl<F> SnapshotSource for F
where
    F: FnMut() -> Result<Vec<u8>, FeedError> + Send + 'static,
{
    fn fetch(&mut self) -> Result<Vec<u8>, FeedError> {
        self()
    }
}

/// Spawn a background thread that fetches from `source` every `interval`
/// and pushes successful payloads into `sink`. Empty payloads and fetch
/// errors are logged at debug level and skipped. The thread exits once the
/// UI side of the channel hangs up.
pub fn spawn_poller<S: SnapshotSource>(
    mut source: S,
    sink: SnapshotSink,
    interval: Duration,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || loop {
        match source.fetch() {
            Ok(bytes) if bytes.is_empty() => {
                log::debug!("snapshot source returned an empty payload, skipping tick");
            }
            Ok(bytes) => {
                if sink.send_raw(bytes).is_err() {
                    break;
                }
            }
            Err(err) => log::debug!("snapshot fetch failed, skipping tick: {err}"),
        }
        std::thread::sleep(interval);
    })
}
