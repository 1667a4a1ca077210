//! Shutdown Coordinator
//!
//! Runs the final save exactly once when the process stops cleanly.
//!
//! The coordinator owns the autosave handle so the last tick can be stopped
//! before the final save. Calling `shutdown` more than once is a no-op, and
//! dropping the coordinator runs it if nobody did. A killed or crashed process
//! skips all of this and loses at most one autosave interval of writes.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::autosave::AutosaveHandle;
use crate::error::Result;
use crate::storage::{SaveReport, SnapshotManager};
use crate::store::Store;

/// Final-flush routine registered once at startup
pub struct ShutdownCoordinator {
    store: Arc<Store>,
    storage: Arc<SnapshotManager>,

    /// `Some` until shutdown has started
    state: Mutex<Option<Option<AutosaveHandle>>>,
}

impl ShutdownCoordinator {
    pub fn new(
        store: Arc<Store>,
        storage: Arc<SnapshotManager>,
        autosave: Option<AutosaveHandle>,
    ) -> Self {
        Self {
            store,
            storage,
            state: Mutex::new(Some(autosave)),
        }
    }

    /// Stop autosave and save one last time
    ///
    /// Returns `Ok(None)` if shutdown already ran.
    pub fn shutdown(&self) -> Result<Option<SaveReport>> {
        // Holding the lock across the save makes concurrent callers wait
        // for the first one to finish
        let mut state = self.state.lock();
        let autosave = match state.take() {
            Some(autosave) => autosave,
            None => return Ok(None),
        };

        if let Some(handle) = autosave {
            handle.stop();
        }

        tracing::info!(entries = self.store.len(), "Running final save");
        match self.storage.save(&self.store) {
            Ok(report) => {
                tracing::info!(
                    entries = report.entries,
                    path = %self.storage.primary_path().display(),
                    "Final save complete"
                );
                Ok(Some(report))
            }
            Err(e) => {
                tracing::error!(error = %e, "Final save failed");
                Err(e)
            }
        }
    }

    /// True once `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.state.lock().is_none()
    }
}

impl Drop for ShutdownCoordinator {
    fn drop(&mut self) {
        // Errors were already logged inside shutdown()
        let _ = self.shutdown();
    }
}
