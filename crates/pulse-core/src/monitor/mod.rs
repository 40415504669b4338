//! High-level monitor API tying the issue source, the settings store, the
//! metrics engine and notification dispatch together.
//!
//! The monitor owns nothing long-lived except paths and the dispatcher: each
//! operation opens the settings database on a blocking thread, reads the
//! snapshot, and computes health as of the instant it is given. Callers that
//! need to keep a selection across calls use [`crate::Dashboard`] instead.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Monitor`] instances with XDG defaults
//! - [`health_ops`]: Projects, health reports, follow-ups, escalations and the
//!   assistant request
//! - [`notify_ops`]: Sending a follow-up or escalation over a channel
//! - [`settings_ops`]: Reading and writing the settings store
//!
//! # Usage
//!
//! ```rust,no_run
//! use jiff::Timestamp;
//! use pulse_core::{params::ProjectKey, MonitorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let monitor = MonitorBuilder::new()
//!     .with_database_path(Some("pulse.db"))
//!     .with_snapshot_path(Some("snapshot.json"))
//!     .build()
//!     .await?;
//!
//! let health = monitor
//!     .health(&ProjectKey { project: "PRJ".to_string() }, Timestamp::now())
//!     .await?;
//! println!("{}", health.overall.as_str());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::{notify::Dispatcher, source::SnapshotSource};

pub mod builder;
pub mod health_ops;
pub mod notify_ops;
pub mod settings_ops;

#[cfg(test)]
mod tests;

pub use builder::MonitorBuilder;

/// Main interface for computing project health and sending notifications.
pub struct Monitor {
    pub(crate) db_path: PathBuf,
    pub(crate) source: SnapshotSource,
    pub(crate) dispatcher: Dispatcher,
}

impl Monitor {
    pub(crate) fn new(db_path: PathBuf, source: SnapshotSource, dispatcher: Dispatcher) -> Self {
        Self {
            db_path,
            source,
            dispatcher,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// The issue source backing this monitor.
    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }
}
