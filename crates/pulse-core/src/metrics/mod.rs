//! The metrics engine.
//!
//! [`HealthEngine::compute`] turns one immutable issue snapshot into a
//! [`ProjectHealth`]. It is a pure function of its inputs: the caller captures
//! "now" once and every time-relative rule in the pass is evaluated against
//! that same instant, so two calls with the same issues and the same `now`
//! yield identical results.
//!
//! # Example
//!
//! ```
//! use jiff::Timestamp;
//! use pulse_core::metrics::compute_health;
//! use pulse_core::models::OverallHealth;
//!
//! let health = compute_health(&[], Timestamp::UNIX_EPOCH);
//! assert_eq!(health.overall, OverallHealth::Healthy);
//! assert_eq!(health.schedule.completion_percentage, 0.0);
//! ```

mod cost;
mod escalation;
mod follow_up;
mod overall;
mod risk;
mod schedule;
pub mod time;


use jiff::Timestamp;
use log::debug;

pub use escalation::{level_for as escalation_level_for, RECENT_ESCALATION_LIMIT};
pub use follow_up::WAITING_STATUS_PATTERNS;
pub use overall::classify as classify_overall;
pub use risk::{BLOCKED_WEIGHT, DELAYED_WEIGHT, HIGH_PRIORITY_WEIGHT, UNASSIGNED_WEIGHT};

use crate::{
    config::EngineConfig,
    models::{Issue, ProjectHealth},
};

/// Issues of one pass sorted into the buckets every aggregator shares.
pub(crate) struct WorkSet<'a> {
    pub now: Timestamp,
    pub epics: Vec<&'a Issue>,
    pub work_items: Vec<&'a Issue>,
    pub blocked: Vec<&'a Issue>,
    pub delayed: Vec<&'a Issue>,
    pub upcoming: Vec<&'a Issue>,
}

impl<'a> WorkSet<'a> {
    pub fn classify(issues: &'a [Issue], now: Timestamp) -> Self {
        let epics = issues.iter().filter(|issue| issue.is_epic()).collect();
        let work_items: Vec<&Issue> = issues.iter().filter(|issue| issue.is_work_item()).collect();

        let blocked = work_items
            .iter()
            .copied()
            .filter(|issue| issue.is_blocked())
            .collect();

        let open_with_due = || {
            work_items
                .iter()
                .copied()
                .filter(|issue| !issue.is_done())
                .filter_map(|issue| issue.due_date.map(|due| (issue, due)))
        };
        let delayed = open_with_due()
            .filter(|(_, due)| *due < now)
            .map(|(issue, _)| issue)
            .collect();
        let upcoming = open_with_due()
            .filter(|(_, due)| time::in_upcoming_window(*due, now))
            .map(|(issue, _)| issue)
            .collect();

        Self {
            now,
            epics,
            work_items,
            blocked,
            delayed,
            upcoming,
        }
    }
}

/// Computes [`ProjectHealth`] under a fixed [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    config: EngineConfig,
}

impl HealthEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive the full health report for `issues` as of `now`.
    ///
    /// Never fails: missing optional fields are skipped by filters and
    /// replaced by documented defaults in arithmetic.
    pub fn compute(&self, issues: &[Issue], now: Timestamp) -> ProjectHealth {
        let set = WorkSet::classify(issues, now);

        let schedule = schedule::aggregate(&set);
        let cost = cost::estimate(&set, &self.config, schedule.completion_percentage);
        let risk = risk::score(&set);
        let escalation = escalation::classify(&set);
        let follow_up = follow_up::compile(&set);
        let overall = overall::classify(&risk, &escalation, &follow_up);

        debug!(
            "Computed health over {} issues: overall={}, risk={}, escalation={}, follow-ups={}",
            issues.len(),
            overall.as_str(),
            risk.score,
            escalation.level,
            follow_up.items.len()
        );

        ProjectHealth {
            overall,
            schedule,
            cost,
            risk,
            escalation,
            follow_up,
        }
    }
}

/// [`HealthEngine::compute`] with the default configuration.
pub fn compute_health(issues: &[Issue], now: Timestamp) -> ProjectHealth {
    HealthEngine::default().compute(issues, now)
}
