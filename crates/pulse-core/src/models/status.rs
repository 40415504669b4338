//! Enumerations describing issue lifecycle, priority and type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authoritative lifecycle signal of an issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    /// Not started yet
    New,

    /// Work has started
    Indeterminate,

    /// Work is complete
    Done,
}

impl FromStr for StatusCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" | "todo" | "to do" => Ok(StatusCategory::New),
            "indeterminate" | "inprogress" | "in_progress" => Ok(StatusCategory::Indeterminate),
            "done" => Ok(StatusCategory::Done),
            _ => Err(format!("Invalid status category: {s}")),
        }
    }
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::New => "new",
            StatusCategory::Indeterminate => "indeterminate",
            StatusCategory::Done => "done",
        }
    }
}

/// Ordered issue priority, highest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(Priority::Highest),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "lowest" => Ok(Priority::Lowest),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Highest => "Highest",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Lowest => "Lowest",
        }
    }

    /// Highest and High count toward the high-priority risk signal.
    pub fn is_high(&self) -> bool {
        matches!(self, Priority::Highest | Priority::High)
    }
}

/// Kind of tracked issue.
///
/// Stories, tasks and bugs are pooled as "work items"; epics are only counted
/// for information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IssueType {
    Epic,
    Story,
    Task,
    Bug,
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "epic" => Ok(IssueType::Epic),
            "story" => Ok(IssueType::Story),
            "task" => Ok(IssueType::Task),
            "bug" => Ok(IssueType::Bug),
            _ => Err(format!("Unsupported issue type: {s}")),
        }
    }
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::Story => "Story",
            IssueType::Task => "Task",
            IssueType::Bug => "Bug",
        }
    }

    pub fn is_work_item(&self) -> bool {
        !matches!(self, IssueType::Epic)
    }
}
