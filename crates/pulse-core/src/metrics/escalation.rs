//! Escalation ladder for severely overdue work.

use super::{time::days_overdue, WorkSet};
use crate::models::{EscalationItem, EscalationMetrics};

/// Items overdue by more than this many days are escalated.
pub const ESCALATION_THRESHOLD_DAYS: i64 = 7;

/// Items overdue by more than this many days reach the top level.
pub const SEVERE_THRESHOLD_DAYS: i64 = 14;

/// Overdue items at or above this many days are tracked as pending.
pub const PENDING_THRESHOLD_DAYS: i64 = 3;

/// Number of items kept in `recent_escalations`.
pub const RECENT_ESCALATION_LIMIT: usize = 5;

/// Level for an item `days` overdue, 0 when it is not escalated.
pub fn level_for(days: i64) -> u8 {
    if days > SEVERE_THRESHOLD_DAYS {
        3
    } else if days > ESCALATION_THRESHOLD_DAYS {
        2
    } else {
        0
    }
}

pub(crate) fn classify(set: &WorkSet<'_>) -> EscalationMetrics {
    let mut escalated_items = Vec::new();
    let mut pending_escalations = Vec::new();

    for issue in &set.delayed {
        let Some(due) = issue.due_date else {
            continue;
        };
        let days = days_overdue(due, set.now);
        match level_for(days) {
            0 if days >= PENDING_THRESHOLD_DAYS => pending_escalations.push((*issue).clone()),
            0 => {}
            level => escalated_items.push(EscalationItem {
                issue: (*issue).clone(),
                level,
                days_overdue: days,
                reason: format!("Overdue by {days} days"),
            }),
        }
    }

    let level = escalated_items
        .iter()
        .map(|item| item.level)
        .max()
        .unwrap_or(0);

    // Stable: equal levels keep source order
    let mut recent_escalations = escalated_items.clone();
    recent_escalations.sort_by(|a, b| b.level.cmp(&a.level));
    recent_escalations.truncate(RECENT_ESCALATION_LIMIT);

    EscalationMetrics {
        level,
        escalated_items,
        pending_escalations,
        recent_escalations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_boundaries() {
        assert_eq!(level_for(-2), 0);
        assert_eq!(level_for(7), 0);
        assert_eq!(level_for(8), 2);
        assert_eq!(level_for(14), 2);
        assert_eq!(level_for(15), 3);
        assert_eq!(level_for(400), 3);
    }
}
