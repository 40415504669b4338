//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so that the models stay plain data.

use std::fmt;

use crate::models::{
    EscalationItem, FollowUpItem, Issue, OverallHealth, Project, ProjectHealth, RiskLevel,
    Severity, Urgency,
};

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.name, self.key)?;
        if let Some(kind) = &self.project_type_key {
            writeln!(f)?;
            writeln!(f, "- Type: {kind}")?;
        }
        writeln!(f)
    }
}

/// One compact bullet per issue, used inside the health report.
struct IssueLine<'a>(&'a Issue);

impl fmt::Display for IssueLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issue = self.0;
        write!(
            f,
            "- {} ({}, {})",
            issue.title(),
            issue.status.name,
            issue.assignee_name()
        )?;
        if let Some(due) = issue.due_date {
            write!(f, ", due {}", due.strftime("%Y-%m-%d"))?;
        }
        writeln!(f)
    }
}

fn issue_section(f: &mut fmt::Formatter<'_>, heading: &str, issues: &[Issue]) -> fmt::Result {
    if issues.is_empty() {
        return Ok(());
    }
    writeln!(f, "### {heading}")?;
    writeln!(f)?;
    for issue in issues {
        write!(f, "{}", IssueLine(issue))?;
    }
    writeln!(f)
}

impl fmt::Display for ProjectHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Project health: {}", self.overall.as_str().to_uppercase())?;
        writeln!(f)?;

        let s = &self.schedule;
        writeln!(f, "## Schedule")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completion: {:.1}% ({}/{} work items)",
            s.completion_percentage, s.completed_work_items, s.total_work_items
        )?;
        writeln!(f, "- Epics: {}/{} done", s.completed_epics, s.total_epics)?;
        writeln!(
            f,
            "- In progress: {}, not started or waiting: {}",
            s.in_progress_work_items, s.other_work_items
        )?;
        writeln!(f, "- Schedule variance: {:.1}", s.schedule_variance)?;
        writeln!(f)?;
        issue_section(f, "Blocked", &s.blocked_stories)?;
        issue_section(f, "Delayed", &s.delayed_tasks)?;
        issue_section(f, "Upcoming deadlines", &s.upcoming_deadlines)?;

        let c = &self.cost;
        writeln!(f, "## Cost")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Rates: {}/hour, {} hours per story point",
            c.hourly_rate, c.hours_per_story_point
        )?;
        writeln!(
            f,
            "- Story points: {} total, {} done, {} remaining, {} overdue",
            c.total_story_points,
            c.completed_story_points,
            c.remaining_story_points,
            c.overdue_story_points
        )?;
        writeln!(f, "- Estimated: {:.2}", c.estimated_cost)?;
        writeln!(f, "- Actual: {:.2}", c.actual_cost)?;
        writeln!(f, "- Overdue exposure: {:.2}", c.overdue_cost)?;
        writeln!(f, "- Cost variance: {:.1}%", c.cost_variance)?;
        writeln!(f)?;

        let r = &self.risk;
        writeln!(f, "## Risk: {} ({}/100)", r.level, r.score)?;
        writeln!(f)?;
        if r.factors.is_empty() {
            writeln!(f, "No risk factors.")?;
        }
        for factor in &r.factors {
            writeln!(
                f,
                "- **{}** ({}): {}",
                factor.name, factor.severity, factor.description
            )?;
        }
        writeln!(f)?;
        issue_section(f, "High priority blocked", &r.high_priority_blocked)?;

        let e = &self.escalation;
        writeln!(f, "## Escalation (level {})", e.level)?;
        writeln!(f)?;
        if e.recent_escalations.is_empty() {
            writeln!(f, "Nothing escalated.")?;
        }
        for item in &e.recent_escalations {
            writeln!(
                f,
                "- {} (level {}, {} days overdue)",
                item.issue.title(),
                item.level,
                item.days_overdue
            )?;
        }
        writeln!(f)?;
        issue_section(f, "Pending escalation", &e.pending_escalations)?;

        let q = &self.follow_up;
        writeln!(
            f,
            "## Follow-ups ({} immediate, {} today, {} upcoming)",
            q.immediate_count, q.today_count, q.upcoming_count
        )?;
        writeln!(f)?;
        if q.items.is_empty() {
            writeln!(f, "Nothing to follow up.")?;
        }
        for item in &q.items {
            writeln!(
                f,
                "- [{}] {}: {} ({})",
                item.urgency, item.issue.title(), item.reason, item.due_in
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for FollowUpItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.issue.title(), self.urgency)?;
        writeln!(f)?;
        writeln!(f, "- Reason: {}", self.reason)?;
        writeln!(f, "- Due: {}", self.due_in)?;
        writeln!(f, "- Status: {}", self.issue.status.name)?;
        writeln!(f, "- Assignee: {}", self.issue.assignee_name())?;
        writeln!(f, "- Priority: {}", self.issue.priority_label())?;
        writeln!(f)
    }
}

impl fmt::Display for EscalationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} (level {})", self.issue.title(), self.level)?;
        writeln!(f)?;
        writeln!(f, "- Reason: {}", self.reason)?;
        writeln!(f, "- Status: {}", self.issue.status.name)?;
        writeln!(f, "- Assignee: {}", self.issue.assignee_name())?;
        if let Some(by) = &self.issue.on_hold_by {
            writeln!(f, "- On hold by: {}", by.display_name)?;
        }
        writeln!(f, "- Priority: {}", self.issue.priority_label())?;
        writeln!(f)
    }
}
