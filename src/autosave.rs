//! Autosave Scheduler
//!
//! Background thread that saves the store on a fixed interval.
//!
//! Ticks come from a crossbeam `tick` channel, so each tick is scheduled
//! relative to the previous one. A failed save is logged and counted and the
//! loop carries on; there is no backoff.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::Result;
use crate::storage::SnapshotManager;
use crate::store::Store;

/// Counters shared between the autosave thread and its handle
#[derive(Debug, Default)]
struct AutosaveStats {
    ticks: AtomicU64,
    failures: AtomicU64,
}

/// Handle to the running autosave thread
///
/// Dropping the handle stops the thread.
pub struct AutosaveHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    stats: Arc<AutosaveStats>,
    interval: Duration,
}

/// Start the autosave thread
pub fn spawn(
    store: Arc<Store>,
    storage: Arc<SnapshotManager>,
    interval: Duration,
) -> Result<AutosaveHandle> {
    let (stop_tx, stop_rx) = channel::bounded::<()>(1);
    let stats = Arc::new(AutosaveStats::default());
    let thread_stats = Arc::clone(&stats);

    let thread = thread::Builder::new()
        .name("snapkv-autosave".to_string())
        .spawn(move || run(store, storage, interval, stop_rx, thread_stats))?;

    tracing::info!(interval_secs = interval.as_secs_f64(), "Autosave started");

    Ok(AutosaveHandle {
        stop_tx: Some(stop_tx),
        thread: Some(thread),
        stats,
        interval,
    })
}

fn run(
    store: Arc<Store>,
    storage: Arc<SnapshotManager>,
    interval: Duration,
    stop_rx: Receiver<()>,
    stats: Arc<AutosaveStats>,
) {
    let ticker = channel::tick(interval);

    loop {
        crossbeam::select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                let tick = stats.ticks.fetch_add(1, Ordering::Relaxed) + 1;
                match storage.save(&store) {
                    Ok(report) => {
                        tracing::debug!(
                            tick,
                            entries = report.entries,
                            bytes = report.bytes_written,
                            "Autosave complete"
                        );
                    }
                    Err(e) => {
                        stats.failures.fetch_add(1, Ordering::Relaxed);
                        tracing::error!(tick, error = %e, "Autosave failed");
                    }
                }
            }
        }
    }

    tracing::debug!("Autosave thread exiting");
}

impl AutosaveHandle {
    /// Stop the thread and wait for it to exit
    ///
    /// A save that is already in progress finishes first.
    pub fn stop(mut self) {
        self.stop_internal();
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.stats.ticks.load(Ordering::Relaxed)
    }

    /// Number of ticks whose save failed
    pub fn failures(&self) -> u64 {
        self.stats.failures.load(Ordering::Relaxed)
    }

    /// Configured tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn stop_internal(&mut self) {
        // Disconnecting the channel wakes the select
        drop(self.stop_tx.take());

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Autosave thread panicked");
            } else {
                tracing::info!("Autosave stopped");
            }
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.stop_internal();
    }
}
