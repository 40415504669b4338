//! Risk scoring from weighted signal counts.
//!
//! The weights below are policy constants. They may be tuned, but the score is
//! always a deterministic function of the four counts, clamped to `[0, 100]`.

use super::WorkSet;
use crate::models::{Issue, RiskFactor, RiskLevel, RiskMetrics, RiskSignals, Severity};

pub const BLOCKED_WEIGHT: u32 = 15;
pub const DELAYED_WEIGHT: u32 = 10;
pub const HIGH_PRIORITY_WEIGHT: u32 = 5;
pub const UNASSIGNED_WEIGHT: u32 = 2;

pub const MAX_RISK_SCORE: u32 = 100;

/// High-priority backlog only counts as a factor above this size.
const HIGH_PRIORITY_BACKLOG_THRESHOLD: usize = 3;

impl RiskSignals {
    pub(crate) fn collect(set: &WorkSet<'_>) -> Self {
        let incomplete = || set.work_items.iter().filter(|issue| !issue.is_done());
        Self {
            blocked: set.blocked.len(),
            delayed: set.delayed.len(),
            high_priority_incomplete: incomplete()
                .filter(|issue| issue.is_high_priority())
                .count(),
            unassigned_incomplete: incomplete().filter(|issue| issue.is_unassigned()).count(),
        }
    }

    /// Weighted sum, clamped to 100.
    pub fn score(&self) -> u32 {
        let weighted = |count: usize, weight: u32| {
            u32::try_from(count)
                .unwrap_or(u32::MAX)
                .saturating_mul(weight)
        };
        weighted(self.blocked, BLOCKED_WEIGHT)
            .saturating_add(weighted(self.delayed, DELAYED_WEIGHT))
            .saturating_add(weighted(self.high_priority_incomplete, HIGH_PRIORITY_WEIGHT))
            .saturating_add(weighted(self.unassigned_incomplete, UNASSIGNED_WEIGHT))
            .min(MAX_RISK_SCORE)
    }

    /// Human-readable explanation, one factor per signal that crossed its
    /// threshold.
    pub fn factors(&self) -> Vec<RiskFactor> {
        let mut factors = Vec::new();

        if self.blocked > 0 {
            factors.push(RiskFactor {
                name: "Blocked Items".to_string(),
                severity: if self.blocked > 3 {
                    Severity::High
                } else {
                    Severity::Medium
                },
                description: format!("{} items are currently blocked", self.blocked),
                impacted_tasks: self.blocked,
            });
        }

        if self.delayed > 0 {
            factors.push(RiskFactor {
                name: "Overdue Tasks".to_string(),
                severity: match self.delayed {
                    n if n > 5 => Severity::High,
                    n if n > 2 => Severity::Medium,
                    _ => Severity::Low,
                },
                description: format!("{} tasks have passed their due date", self.delayed),
                impacted_tasks: self.delayed,
            });
        }

        if self.high_priority_incomplete > HIGH_PRIORITY_BACKLOG_THRESHOLD {
            factors.push(RiskFactor {
                name: "High Priority Backlog".to_string(),
                severity: Severity::High,
                description: format!(
                    "{} high priority items pending",
                    self.high_priority_incomplete
                ),
                impacted_tasks: self.high_priority_incomplete,
            });
        }

        if self.unassigned_incomplete > 0 {
            factors.push(RiskFactor {
                name: "Unassigned Work".to_string(),
                severity: if self.unassigned_incomplete > 5 {
                    Severity::Medium
                } else {
                    Severity::Low
                },
                description: format!("{} items without assignee", self.unassigned_incomplete),
                impacted_tasks: self.unassigned_incomplete,
            });
        }

        factors
    }
}

pub(crate) fn score(set: &WorkSet<'_>) -> RiskMetrics {
    let signals = RiskSignals::collect(set);
    let score = signals.score();

    let high_priority_blocked: Vec<Issue> = set
        .blocked
        .iter()
        .filter(|issue| issue.is_high_priority())
        .map(|issue| (*issue).clone())
        .collect();

    RiskMetrics {
        level: RiskLevel::from_score(score),
        score,
        signals,
        factors: signals.factors(),
        high_priority_blocked,
        overdue_tasks: set.delayed.iter().map(|issue| (*issue).clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(blocked: usize, delayed: usize, high: usize, unassigned: usize) -> RiskSignals {
        RiskSignals {
            blocked,
            delayed,
            high_priority_incomplete: high,
            unassigned_incomplete: unassigned,
        }
    }

    #[test]
    fn test_score_weights() {
        assert_eq!(signals(0, 0, 0, 0).score(), 0);
        assert_eq!(signals(1, 0, 0, 0).score(), 15);
        assert_eq!(signals(0, 1, 0, 0).score(), 10);
        assert_eq!(signals(0, 0, 1, 0).score(), 5);
        assert_eq!(signals(0, 0, 0, 1).score(), 2);
        assert_eq!(signals(1, 1, 1, 1).score(), 32);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(signals(7, 0, 0, 0).score(), 100);
        assert_eq!(signals(usize::MAX, usize::MAX, 1, 1).score(), 100);
    }

    #[test]
    fn test_score_monotonic_in_each_signal() {
        for base in 0..12 {
            let b = signals(base, 2, 3, 1);
            assert!(signals(base + 1, 2, 3, 1).score() >= b.score());
            assert!(signals(base, 3, 3, 1).score() >= b.score());
            assert!(signals(base, 2, 4, 1).score() >= b.score());
            assert!(signals(base, 2, 3, 2).score() >= b.score());
        }
    }

    #[test]
    fn test_factors_emitted_conditionally() {
        assert!(signals(0, 0, 3, 0).factors().is_empty());

        let factors = signals(4, 3, 4, 6).factors();
        let summary: Vec<(&str, Severity, usize)> = factors
            .iter()
            .map(|f| (f.name.as_str(), f.severity, f.impacted_tasks))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Blocked Items", Severity::High, 4),
                ("Overdue Tasks", Severity::Medium, 3),
                ("High Priority Backlog", Severity::High, 4),
                ("Unassigned Work", Severity::Medium, 6),
            ]
        );
    }

    #[test]
    fn test_factor_severity_boundaries() {
        let f = signals(3, 2, 0, 5).factors();
        assert_eq!(f[0].severity, Severity::Medium);
        assert_eq!(f[1].severity, Severity::Low);
        assert_eq!(f[2].severity, Severity::Low);

        let f = signals(0, 6, 0, 0).factors();
        assert_eq!(f[0].severity, Severity::High);
    }
}
