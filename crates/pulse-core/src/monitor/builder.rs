//! Builder for creating and configuring Monitor instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Monitor;
use crate::{
    db::Database,
    error::{PulseError, Result},
    notify::Dispatcher,
    source::SnapshotSource,
};

const XDG_PREFIX: &str = "pulse";
const DATABASE_FILE: &str = "pulse.db";
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Builder for creating and configuring Monitor instances.
#[derive(Debug, Clone, Default)]
pub struct MonitorBuilder {
    database_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    dispatcher: Option<Dispatcher>,
}

impl MonitorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pulse/pulse.db` or `~/.local/share/pulse/pulse.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the snapshot file the issue source reads.
    ///
    /// Defaults to `$XDG_DATA_HOME/pulse/snapshot.json`.
    pub fn with_snapshot_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.snapshot_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the default SendGrid/Teams dispatcher, e.g. to point the
    /// channels at a different host.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Builds the configured monitor instance.
    ///
    /// The snapshot file is not required to exist yet; it is read on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `PulseError::Database` if database initialization fails
    pub async fn build(self) -> Result<Monitor> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_data_path(DATABASE_FILE)?,
        };
        let snapshot_path = match self.snapshot_path {
            Some(path) => path,
            None => Self::default_data_path(SNAPSHOT_FILE)?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PulseError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PulseError>(())
        })
        .await
        .map_err(|e| PulseError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!(
            "Monitor using database {} and snapshot {}",
            db_path.display(),
            snapshot_path.display()
        );

        Ok(Monitor::new(
            db_path,
            SnapshotSource::new(snapshot_path),
            self.dispatcher.unwrap_or_default(),
        ))
    }

    /// Returns a path under the XDG data directory, creating the directory.
    fn default_data_path(file: &str) -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(XDG_PREFIX)
            .place_data_file(file)
            .map_err(|e| PulseError::XdgDirectory(e.to_string()))
    }
}
