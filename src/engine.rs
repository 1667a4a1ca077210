//! Engine Module
//!
//! Ties the store to its snapshot directory.
//!
//! ## Responsibilities
//! - Open the data directory and load the latest snapshot before serving
//! - Route protocol commands to the store
//! - Start autosave and build the shutdown coordinator

use std::path::Path;
use std::sync::Arc;

use crate::autosave::{self, AutosaveHandle};
use crate::config::Config;
use crate::entry::Entry;
use crate::error::Result;
use crate::protocol::{Command, Response};
use crate::shutdown::ShutdownCoordinator;
use crate::storage::{SaveReport, SnapshotManager};
use crate::store::Store;

/// The main engine
///
/// ## Concurrency Model
///
/// - **Store**: one RwLock around the map. Mutations are exclusive, reads
///   share the lock.
/// - **Saves**: copy the map under the read lock, then write without it.
///   Saves serialize among themselves inside `SnapshotManager`.
/// - **Autosave**: one background thread holding clones of the `Arc`s.
///
/// Cloning an `Engine` is cheap; clones share the same store.
#[derive(Clone)]
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// In-memory entries
    store: Arc<Store>,

    /// Snapshot directory
    storage: Arc<SnapshotManager>,
}

impl Engine {
    /// Open the engine with the given config
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Create the data directory if it doesn't exist
    /// 3. Load the latest snapshot (empty if missing or corrupt)
    /// 4. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Reject unusable settings
        config.validate()?;

        // Step 2: Open the data directory (the only fatal storage error)
        let storage = SnapshotManager::open(&config.data_dir)?;

        // Step 3: Populate the store before anything can read it
        let store = Store::from_snapshot(storage.load());

        tracing::info!(
            entries = store.len(),
            data_dir = %config.data_dir.display(),
            "Engine opened"
        );

        Ok(Self {
            config,
            store: Arc::new(store),
            storage: Arc::new(storage),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Execute a command
    ///
    /// Routes commands to the store and maps the outcome to a response
    pub fn execute(&self, command: Command) -> Response {
        tracing::trace!(command = command.command_type().as_str(), "Executing command");

        match command {
            Command::List => Response::Mapping(self.store.list_all()),
            Command::Get { id } => match self.store.get(&id) {
                Some(data) => Response::Entry(Entry::new(id, data)),
                None => Response::NotFound,
            },
            Command::Create { data } => Response::Entry(self.store.create(data)),
            Command::Update { id, data } => match self.store.update(&id, data) {
                Ok(entry) => Response::Entry(entry),
                Err(_) => Response::NotFound,
            },
            Command::Delete { id } => match self.store.delete(&id) {
                Ok(()) => Response::Deleted,
                Err(_) => Response::NotFound,
            },
        }
    }

    /// Save the store now
    pub fn save(&self) -> Result<SaveReport> {
        self.storage.save(&self.store)
    }

    /// Start the autosave thread using the configured interval
    pub fn start_autosave(&self) -> Result<AutosaveHandle> {
        autosave::spawn(
            Arc::clone(&self.store),
            Arc::clone(&self.storage),
            self.config.autosave_interval,
        )
    }

    /// Build the shutdown coordinator, handing it the autosave thread
    pub fn shutdown_coordinator(&self, autosave: Option<AutosaveHandle>) -> ShutdownCoordinator {
        ShutdownCoordinator::new(Arc::clone(&self.store), Arc::clone(&self.storage), autosave)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Get the snapshot manager
    pub fn storage(&self) -> &Arc<SnapshotManager> {
        &self.storage
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
