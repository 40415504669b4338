use crate::models::{EscalationMetrics, FollowUpMetrics, OverallHealth, RiskLevel, RiskMetrics};

/// More immediate follow-ups than this turn the project to warning.
pub const IMMEDIATE_FOLLOW_UP_LIMIT: usize = 3;

/// Decision table, first match wins.
pub fn classify(
    risk: &RiskMetrics,
    escalation: &EscalationMetrics,
    follow_up: &FollowUpMetrics,
) -> OverallHealth {
    if risk.level == RiskLevel::Critical || escalation.level >= 3 {
        OverallHealth::Critical
    } else if risk.level == RiskLevel::High
        || escalation.level >= 2
        || follow_up.immediate_count > IMMEDIATE_FOLLOW_UP_LIMIT
    {
        OverallHealth::Warning
    } else {
        OverallHealth::Healthy
    }
}
