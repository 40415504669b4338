//! Issue snapshot types as delivered by the issue source.

use std::collections::BTreeSet;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use super::{IssueType, Priority, StatusCategory};

/// Label that marks an issue as blocked regardless of its status name.
pub const BLOCKED_LABEL: &str = "blocked";

/// Status of an issue: a free-text name layered over an authoritative category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueStatus {
    /// Workflow label, e.g. "Blocked", "On Hold", "Waiting for Approval"
    pub name: String,

    /// Lifecycle category
    pub category: StatusCategory,
}

impl IssueStatus {
    pub fn new(name: impl Into<String>, category: StatusCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Case-insensitive substring match on the status name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A person attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Assignee {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: Some(email.into()),
        }
    }
}

/// The unit of work tracked by the issue source.
///
/// Issues are immutable snapshots: the engine reads them and never writes
/// back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque unique identifier
    pub id: String,

    /// Human-readable stable key, e.g. `PRJ-42`
    pub key: String,

    pub summary: String,

    pub status: IssueStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    pub issue_type: IssueType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,

    /// Due instant; bare `YYYY-MM-DD` dates are read as midnight UTC
    #[serde(
        default,
        with = "due_date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f64>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub labels: BTreeSet<String>,

    /// Key of the parent epic, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Who placed the issue on hold, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hold_by: Option<Assignee>,
}

impl Issue {
    /// `KEY: summary`, the title used in notifications and reports.
    pub fn title(&self) -> String {
        format!("{}: {}", self.key, self.summary)
    }

    pub fn is_work_item(&self) -> bool {
        self.issue_type.is_work_item()
    }

    pub fn is_epic(&self) -> bool {
        self.issue_type == IssueType::Epic
    }

    pub fn is_done(&self) -> bool {
        self.status.category == StatusCategory::Done
    }

    pub fn is_in_progress(&self) -> bool {
        self.status.category == StatusCategory::Indeterminate
    }

    /// Blocked by status name or by the `blocked` label.
    pub fn is_blocked(&self) -> bool {
        self.status.name_contains("blocked") || self.labels.contains(BLOCKED_LABEL)
    }

    pub fn is_on_hold(&self) -> bool {
        self.status.name_contains("hold")
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority.is_some_and(|p| p.is_high())
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee.is_none()
    }

    /// Story points, falling back to `default` when the source has none.
    pub fn story_points_or(&self, default: f64) -> f64 {
        self.story_points.unwrap_or(default)
    }

    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map_or("Unassigned", |a| a.display_name.as_str())
    }

    pub fn priority_label(&self) -> &str {
        self.priority.map_or("Not set", |p| p.as_str())
    }
}

/// Parse a due date given either as an RFC 3339 timestamp or a civil date.
pub fn parse_due_date(raw: &str) -> Result<Timestamp, String> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    let date: Date = raw
        .parse()
        .map_err(|e| format!("Invalid due date '{raw}': {e}"))?;
    date.to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp())
        .map_err(|e| format!("Invalid due date '{raw}': {e}"))
}

mod due_date_format {
    use jiff::Timestamp;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.collect_str(ts),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| super::parse_due_date(&s).map_err(D::Error::custom))
            .transpose()
    }
}
