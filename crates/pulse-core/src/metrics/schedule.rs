//! Schedule aggregation: completion, blockage and delay.

use super::WorkSet;
use crate::models::{Issue, ScheduleMetrics, StatusCategory};

fn owned(issues: &[&Issue]) -> Vec<Issue> {
    issues.iter().map(|issue| (*issue).clone()).collect()
}

/// Share of `part` in `total` as a percentage, 0 for an empty total.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

pub(crate) fn aggregate(set: &WorkSet<'_>) -> ScheduleMetrics {
    let total = set.work_items.len();
    let count = |category: StatusCategory| {
        set.work_items
            .iter()
            .filter(|issue| issue.status.category == category)
            .count()
    };
    let completed = count(StatusCategory::Done);
    let in_progress = count(StatusCategory::Indeterminate);

    let schedule_variance = if set.delayed.is_empty() {
        0.0
    } else {
        -percentage(set.delayed.len(), total)
    };

    ScheduleMetrics {
        total_epics: set.epics.len(),
        completed_epics: set.epics.iter().filter(|epic| epic.is_done()).count(),
        total_work_items: total,
        completed_work_items: completed,
        in_progress_work_items: in_progress,
        other_work_items: total - completed - in_progress,
        blocked_stories: owned(&set.blocked),
        delayed_tasks: owned(&set.delayed),
        upcoming_deadlines: owned(&set.upcoming),
        completion_percentage: percentage(completed, total),
        schedule_variance,
    }
}
