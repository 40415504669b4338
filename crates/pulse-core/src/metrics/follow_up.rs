//! Follow-up queue compiled from three triggers.
//!
//! Triggers run in a fixed order (due-soon, on-hold, upcoming deadline) and
//! the first one to claim an issue key wins. The final queue is sorted by
//! urgency with a stable sort, so ties keep trigger order.

use std::collections::HashSet;

use jiff::Timestamp;

use super::{
    time::{days_overdue, days_until, hours_until, plural},
    WorkSet,
};
use crate::models::{FollowUpItem, FollowUpMetrics, FollowUpTrigger, Issue, StatusCategory, Urgency};

/// Status name fragments that mark an issue as waiting on someone.
pub const WAITING_STATUS_PATTERNS: [&str; 4] = ["hold", "waiting", "blocked", "backlog"];

const IMMEDIATE_HOURS: f64 = 8.0;
const TODAY_HOURS: f64 = 24.0;
const DUE_SOON_HOURS: f64 = 72.0;

fn due_soon(issue: &Issue, now: Timestamp) -> Option<FollowUpItem> {
    if !issue.is_in_progress() {
        return None;
    }
    let due = issue.due_date?;
    let hours = hours_until(due, now);

    let (urgency, reason, due_in) = if hours <= 0.0 {
        let days = days_overdue(due, now);
        (
            Urgency::Immediate,
            format!("Overdue by {}", plural(days, "day")),
            "Overdue".to_string(),
        )
    } else if hours <= IMMEDIATE_HOURS {
        (
            Urgency::Immediate,
            "Due within 8 hours".to_string(),
            plural(hours.ceil() as i64, "hour"),
        )
    } else if hours <= TODAY_HOURS {
        (
            Urgency::Today,
            "Due within 24 hours".to_string(),
            plural(hours.ceil() as i64, "hour"),
        )
    } else if hours <= DUE_SOON_HOURS {
        (
            Urgency::Upcoming,
            "Due within 3 days".to_string(),
            plural(days_until(due, now), "day"),
        )
    } else {
        return None;
    };

    Some(FollowUpItem {
        issue: issue.clone(),
        trigger: FollowUpTrigger::DueSoon,
        reason,
        due_in,
        urgency,
    })
}

/// Matches on the status name alone, so a done item whose status still reads
/// "on hold" is queued too.
fn is_waiting(issue: &Issue) -> bool {
    issue.status.category == StatusCategory::New
        || WAITING_STATUS_PATTERNS
            .iter()
            .any(|pattern| issue.status.name_contains(pattern))
}

fn on_hold(issue: &Issue) -> Option<FollowUpItem> {
    is_waiting(issue).then(|| FollowUpItem {
        issue: issue.clone(),
        trigger: FollowUpTrigger::OnHold,
        reason: format!("Status: {} - needs review", issue.status.name),
        due_in: "ASAP".to_string(),
        urgency: Urgency::Today,
    })
}

fn upcoming_deadline(issue: &Issue, now: Timestamp) -> Option<FollowUpItem> {
    let days = days_until(issue.due_date?, now);
    let (urgency, due_in) = if days == 0 {
        (Urgency::Today, "Today".to_string())
    } else {
        (Urgency::Upcoming, plural(days, "day"))
    };
    Some(FollowUpItem {
        issue: issue.clone(),
        trigger: FollowUpTrigger::UpcomingDeadline,
        reason: "Approaching deadline".to_string(),
        due_in,
        urgency,
    })
}

pub(crate) fn compile(set: &WorkSet<'_>) -> FollowUpMetrics {
    let now = set.now;
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    let candidates = set
        .work_items
        .iter()
        .filter_map(|issue| due_soon(issue, now))
        .chain(set.work_items.iter().filter_map(|issue| on_hold(issue)))
        .chain(
            set.upcoming
                .iter()
                .filter_map(|issue| upcoming_deadline(issue, now)),
        );

    for item in candidates {
        if seen.insert(item.issue.key.clone()) {
            items.push(item);
        }
    }

    items.sort_by_key(|item| item.urgency.rank());

    let tally = |urgency: Urgency| items.iter().filter(|item| item.urgency == urgency).count();

    FollowUpMetrics {
        immediate_count: tally(Urgency::Immediate),
        today_count: tally(Urgency::Today),
        upcoming_count: tally(Urgency::Upcoming),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueStatus, IssueType};

    fn review_task(due_in_hours: i64, now: Timestamp) -> Issue {
        Issue {
            id: "1".to_string(),
            key: "OPS-1".to_string(),
            summary: "Rotate certificates".to_string(),
            status: IssueStatus::new("In Review", StatusCategory::Indeterminate),
            priority: None,
            issue_type: IssueType::Task,
            assignee: None,
            due_date: Some(Timestamp::from_second(now.as_second() + due_in_hours * 3600).unwrap()),
            story_points: None,
            labels: Default::default(),
            parent: None,
            on_hold_by: None,
        }
    }

    #[test]
    fn test_upcoming_deadline_today_versus_later() {
        let now = Timestamp::from_second(1_717_243_200).unwrap();

        let today = upcoming_deadline(&review_task(5, now), now).unwrap();
        assert_eq!(today.urgency, Urgency::Today);
        assert_eq!(today.due_in, "Today");
        assert_eq!(today.reason, "Approaching deadline");

        let later = upcoming_deadline(&review_task(50, now), now).unwrap();
        assert_eq!(later.urgency, Urgency::Upcoming);
        assert_eq!(later.due_in, "2 days");
    }

    #[test]
    fn test_due_soon_ignores_items_not_in_progress() {
        let now = Timestamp::from_second(1_717_243_200).unwrap();
        let mut issue = review_task(2, now);
        issue.status.category = StatusCategory::New;
        assert!(due_soon(&issue, now).is_none());
        assert!(on_hold(&issue).is_some());
    }
}
