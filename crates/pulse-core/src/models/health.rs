//! Derived project-health types.
//!
//! Everything in here is produced by [`crate::metrics::HealthEngine`] and
//! recomputed wholesale on every refresh. Nothing carries identity of its own:
//! follow-up and escalation items are identified by the issue they wrap.

use serde::{Deserialize, Serialize};

use super::Issue;

/// Overall verdict for a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Warning,
    Critical,
}

impl OverallHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallHealth::Healthy => "healthy",
            OverallHealth::Warning => "warning",
            OverallHealth::Critical => "critical",
        }
    }
}

/// Qualitative risk level derived from the numeric score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// `<25` low, `<50` medium, `<75` high, otherwise critical.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=24 => RiskLevel::Low,
            25..=49 => RiskLevel::Medium,
            50..=74 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Severity attached to a single risk factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Required response speed for a follow-up item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Immediate,
    Today,
    Upcoming,
}

impl Urgency {
    /// Sort rank: immediate first.
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Immediate => 0,
            Urgency::Today => 1,
            Urgency::Upcoming => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Today => "today",
            Urgency::Upcoming => "upcoming",
        }
    }
}

/// Which rule put an issue in the follow-up queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FollowUpTrigger {
    DueSoon,
    OnHold,
    UpcomingDeadline,
}

/// Completion and delay summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    pub total_epics: usize,
    pub completed_epics: usize,
    pub total_work_items: usize,
    pub completed_work_items: usize,
    pub in_progress_work_items: usize,
    /// Work items that are neither done nor in progress
    pub other_work_items: usize,
    pub blocked_stories: Vec<Issue>,
    pub delayed_tasks: Vec<Issue>,
    pub upcoming_deadlines: Vec<Issue>,
    /// In `[0, 100]`
    pub completion_percentage: f64,
    /// Never positive; negative means behind schedule
    pub schedule_variance: f64,
}

/// Story points translated into currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostMetrics {
    pub hourly_rate: f64,
    pub hours_per_story_point: f64,
    pub total_story_points: f64,
    pub completed_story_points: f64,
    pub remaining_story_points: f64,
    pub overdue_story_points: f64,
    pub estimated_cost: f64,
    pub actual_cost: f64,
    pub overdue_cost: f64,
    /// Percent of estimated cost incurred beyond what the completion fraction
    /// warrants, overdue exposure included
    pub cost_variance: f64,
}

/// Raw signal counts feeding the risk score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSignals {
    pub blocked: usize,
    pub delayed: usize,
    pub high_priority_incomplete: usize,
    pub unassigned_incomplete: usize,
}

/// A named explanation contributing to the qualitative risk level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub impacted_tasks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub level: RiskLevel,
    /// In `[0, 100]`
    pub score: u32,
    pub signals: RiskSignals,
    pub factors: Vec<RiskFactor>,
    pub high_priority_blocked: Vec<Issue>,
    pub overdue_tasks: Vec<Issue>,
}

/// A severely overdue issue that needs management attention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EscalationItem {
    pub issue: Issue,
    pub level: u8,
    pub days_overdue: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EscalationMetrics {
    /// Highest item level, 0 when nothing is escalated
    pub level: u8,
    pub escalated_items: Vec<EscalationItem>,
    /// Overdue between 3 and 7 days: trending toward escalation
    pub pending_escalations: Vec<Issue>,
    /// Most severe first, capped for display
    pub recent_escalations: Vec<EscalationItem>,
}

/// An issue in the follow-up queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpItem {
    pub issue: Issue,
    pub trigger: FollowUpTrigger,
    pub reason: String,
    /// Human label such as "5 hours", "ASAP" or "Today"
    pub due_in: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpMetrics {
    pub items: Vec<FollowUpItem>,
    pub immediate_count: usize,
    pub today_count: usize,
    pub upcoming_count: usize,
}

/// The sole output of the metrics engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealth {
    pub overall: OverallHealth,
    pub schedule: ScheduleMetrics,
    pub cost: CostMetrics,
    pub risk: RiskMetrics,
    pub escalation: EscalationMetrics,
    pub follow_up: FollowUpMetrics,
}

impl ProjectHealth {
    /// Follow-up item wrapping the issue with `key`, if queued.
    pub fn follow_up(&self, key: &str) -> Option<&FollowUpItem> {
        self.follow_up.items.iter().find(|item| item.issue.key == key)
    }

    /// Escalation item wrapping the issue with `key`, if escalated.
    pub fn escalation(&self, key: &str) -> Option<&EscalationItem> {
        self.escalation
            .escalated_items
            .iter()
            .find(|item| item.issue.key == key)
    }
}
