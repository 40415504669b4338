//! Cost model: story points converted through fixed rates.

use super::WorkSet;
use crate::{
    config::EngineConfig,
    models::{CostMetrics, Issue},
};

fn points(issues: &[&Issue], default: f64) -> f64 {
    issues
        .iter()
        .map(|issue| issue.story_points_or(default))
        .sum()
}

/// `completion_percentage` comes from the schedule of the same pass.
pub(crate) fn estimate(
    set: &WorkSet<'_>,
    config: &EngineConfig,
    completion_percentage: f64,
) -> CostMetrics {
    let rates = config.rates;
    let default = config.default_story_points;

    let done: Vec<&Issue> = set
        .work_items
        .iter()
        .copied()
        .filter(|issue| issue.is_done())
        .collect();

    let total_story_points = points(&set.work_items, default);
    let completed_story_points = points(&done, default);
    let overdue_story_points = points(&set.delayed, default);

    let estimated_cost = rates.cost_of(total_story_points);
    let actual_cost = rates.cost_of(completed_story_points);
    let overdue_cost = rates.cost_of(overdue_story_points);

    let cost_variance = if estimated_cost > 0.0 {
        let expected = estimated_cost * completion_percentage / 100.0;
        100.0 * (actual_cost + overdue_cost - expected) / estimated_cost
    } else {
        0.0
    };

    CostMetrics {
        hourly_rate: rates.hourly_rate,
        hours_per_story_point: rates.hours_per_story_point,
        total_story_points,
        completed_story_points,
        remaining_story_points: total_story_points - completed_story_points,
        overdue_story_points,
        estimated_cost,
        actual_cost,
        overdue_cost,
        cost_variance,
    }
}
