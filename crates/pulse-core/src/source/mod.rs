//! Issue sources.
//!
//! An [`IssueSource`] delivers the project list and, per project, a snapshot
//! of its issues. The engine only ever sees the resulting `Vec<Issue>`; a
//! source failure surfaces as [`crate::PulseError::Source`] and leaves it to
//! the caller to keep whatever health it computed before.

pub mod jira;
mod snapshot;

use std::future::Future;

pub use jira::JiraIssue;
pub use snapshot::{Snapshot, SnapshotIssue, SnapshotSource};

use crate::{
    error::Result,
    models::{Issue, Project},
};

/// Contract of an issue tracker as seen by the dashboard.
pub trait IssueSource {
    /// All projects visible to the user.
    fn projects(&self) -> impl Future<Output = Result<Vec<Project>>> + Send;

    /// Current issues of `project_key`.
    ///
    /// Fails with [`crate::PulseError::ProjectNotFound`] for unknown keys.
    fn issues(&self, project_key: &str) -> impl Future<Output = Result<Vec<Issue>>> + Send;
}
