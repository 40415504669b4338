//! JSON snapshot files as an issue source.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task;

use super::{jira::JiraIssue, IssueSource};
use crate::{
    error::{PulseError, Result},
    models::{Issue, Project},
};

/// An issue in either the native flat shape or the Jira REST shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    Flat(Issue),
    Jira(JiraIssue),
}

impl SnapshotIssue {
    /// Entries carrying a `fields` object are read as Jira issues, anything
    /// else as the flat model.
    pub fn from_value(value: Value) -> std::result::Result<Self, serde_json::Error> {
        if value.get("fields").is_some_and(Value::is_object) {
            serde_json::from_value(value).map(SnapshotIssue::Jira)
        } else {
            serde_json::from_value(value).map(SnapshotIssue::Flat)
        }
    }

    /// Convert into the engine's model.
    pub fn into_issue(self) -> std::result::Result<Issue, String> {
        match self {
            SnapshotIssue::Flat(issue) => Ok(issue),
            SnapshotIssue::Jira(jira) => Issue::try_from(jira),
        }
    }
}

/// Contents of a snapshot file:
/// `{"projects": [...], "issues": {"PRJ": [...]}}`.
///
/// Issues stay raw JSON until a project is read, so one malformed record is
/// skipped instead of failing the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    #[serde(default)]
    pub issues: BTreeMap<String, Vec<Value>>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PulseError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Issues of `project_key` in the engine's model. Entries that do not
    /// parse, or whose type is not tracked, are skipped with a warning.
    pub fn issues_for(&self, project_key: &str) -> Result<Vec<Issue>> {
        if !self.projects.iter().any(|p| p.key == project_key) {
            return Err(PulseError::ProjectNotFound {
                key: project_key.to_string(),
            });
        }

        let raw = self
            .issues
            .get(project_key)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let issues: Vec<Issue> = raw
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let label = value
                    .get("key")
                    .and_then(Value::as_str)
                    .map_or_else(|| format!("#{index}"), str::to_string);
                let converted = SnapshotIssue::from_value(value.clone())
                    .map_err(|e| e.to_string())
                    .and_then(SnapshotIssue::into_issue);
                match converted {
                    Ok(issue) => Some(issue),
                    Err(e) => {
                        warn!("Skipping issue {label} of {project_key}: {e}");
                        None
                    }
                }
            })
            .collect();

        debug!(
            "Loaded {} of {} issues for {project_key}",
            issues.len(),
            raw.len()
        );
        Ok(issues)
    }
}

/// Reads a [`Snapshot`] from disk on every request, so edits to the file are
/// picked up by the next refresh.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Snapshot> {
        let path = self.path.clone();
        task::spawn_blocking(move || Snapshot::load(&path))
            .await
            .map_err(|e| PulseError::Configuration {
                message: format!("Task join error: {e}"),
            })?
            .map_err(|e| PulseError::source(format!("Failed to read snapshot: {e}")))
    }
}

impl IssueSource for SnapshotSource {
    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.read().await?.projects)
    }

    async fn issues(&self, project_key: &str) -> Result<Vec<Issue>> {
        self.read().await?.issues_for(project_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueType;

    const SNAPSHOT: &str = r#"{
        "projects": [
            {"id": "1", "key": "PRJ", "name": "Payments", "projectTypeKey": "software"},
            {"id": "2", "key": "OPS", "name": "Operations"}
        ],
        "issues": {
            "PRJ": [
                {
                    "id": "100", "key": "PRJ-1", "summary": "Checkout",
                    "status": {"name": "Done", "category": "done"},
                    "issueType": "Epic"
                },
                {
                    "id": "101", "key": "PRJ-2",
                    "fields": {
                        "summary": "Card vault",
                        "status": {"name": "In Progress", "statusCategory": {"key": "indeterminate"}},
                        "issuetype": {"name": "Story"},
                        "customfield_10016": 8
                    }
                },
                {
                    "id": "102", "key": "PRJ-3",
                    "fields": {
                        "summary": "Fix typo",
                        "status": {"name": "To Do", "statusCategory": {"key": "new"}},
                        "issuetype": {"name": "Sub-task"}
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_mixed_shapes_and_skipped_types() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let issues = snapshot.issues_for("PRJ").unwrap();

        let summary: Vec<(&str, IssueType)> = issues
            .iter()
            .map(|i| (i.key.as_str(), i.issue_type))
            .collect();
        assert_eq!(
            summary,
            vec![("PRJ-1", IssueType::Epic), ("PRJ-2", IssueType::Story)]
        );
        assert_eq!(issues[1].story_points, Some(8.0));
    }

    #[test]
    fn test_malformed_flat_issues_are_skipped() {
        let json = r#"{
            "projects": [{"id": "1", "key": "PRJ", "name": "Payments"}],
            "issues": {"PRJ": [
                {"id": "1", "key": "PRJ-1", "summary": "Card form",
                 "status": {"name": "In Progress", "category": "indeterminate"},
                 "issueType": "Story"},
                {"id": "2", "key": "PRJ-2", "summary": "Fix typo",
                 "status": {"name": "To Do", "category": "new"},
                 "issueType": "Sub-task"},
                {"id": "3", "key": "PRJ-3", "summary": "Refund",
                 "status": {"name": "Parked", "category": "parked"},
                 "issueType": "Task"},
                "not an issue"
            ]}
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        let issues = snapshot.issues_for("PRJ").unwrap();

        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["PRJ-1"]);
    }

    #[test]
    fn test_known_project_without_issues() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        assert!(snapshot.issues_for("OPS").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_project() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let err = snapshot.issues_for("NOPE").unwrap_err();
        assert!(matches!(err, PulseError::ProjectNotFound { key } if key == "NOPE"));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_source_error() {
        let source = SnapshotSource::new("/nonexistent/pulse/snapshot.json");
        let err = source.projects().await.unwrap_err();
        assert!(matches!(err, PulseError::Source { .. }));
    }
}
