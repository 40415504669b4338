//! Data models for issues, projects and derived project health.
//!
//! This module contains the domain models of the pulse health engine. Display
//! implementations for these models live in [`crate::display`] to keep data
//! structures separate from presentation.
//!
//! # Input vs. derived models
//!
//! - **Input**: [`Issue`] and [`Project`] are snapshots delivered by an issue
//!   source. They are never mutated.
//! - **Derived**: [`ProjectHealth`] and its metric groups are produced by the
//!   metrics engine and recomputed on every refresh.
//!
//! All models serialize with camelCase field names, which is the shape the
//! assistant context and `--json` output expose.
//!
//! # Examples
//!
//! ```rust
//! use pulse_core::models::{Issue, IssueStatus, IssueType, StatusCategory};
//!
//! let json = r#"{
//!     "id": "10001",
//!     "key": "PRJ-1",
//!     "summary": "Wire up login",
//!     "status": { "name": "In Progress", "category": "indeterminate" },
//!     "issueType": "Story",
//!     "dueDate": "2024-03-01",
//!     "labels": ["blocked"]
//! }"#;
//! let issue: Issue = serde_json::from_str(json).unwrap();
//! assert_eq!(issue.status, IssueStatus::new("In Progress", StatusCategory::Indeterminate));
//! assert_eq!(issue.issue_type, IssueType::Story);
//! assert!(issue.is_blocked());
//! assert!(issue.due_date.is_some());
//! ```

pub mod health;
pub mod issue;
pub mod project;
pub mod status;

#[cfg(test)]
mod tests;

pub use health::{
    CostMetrics, EscalationItem, EscalationMetrics, FollowUpItem, FollowUpMetrics,
    FollowUpTrigger, OverallHealth, ProjectHealth, RiskFactor, RiskLevel, RiskMetrics,
    RiskSignals, ScheduleMetrics, Severity, Urgency,
};
pub use issue::{parse_due_date, Assignee, Issue, IssueStatus, BLOCKED_LABEL};
pub use project::Project;
pub use status::{IssueType, Priority, StatusCategory};
