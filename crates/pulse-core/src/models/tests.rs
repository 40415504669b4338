#[cfg(test)]
mod model_tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use crate::models::{
        parse_due_date, Assignee, Issue, IssueStatus, IssueType, Priority, RiskLevel,
        StatusCategory, Urgency,
    };

    fn create_test_issue() -> Issue {
        Issue {
            id: "10042".to_string(),
            key: "PRJ-42".to_string(),
            summary: "Migrate billing service".to_string(),
            status: IssueStatus::new("On Hold", StatusCategory::Indeterminate),
            priority: Some(Priority::High),
            issue_type: IssueType::Story,
            assignee: Some(Assignee::new("Ada Lovelace", "ada@example.com")),
            due_date: Some(Timestamp::from_second(1704067200).unwrap()), // 2024-01-01 00:00:00 UTC
            story_points: Some(5.0),
            labels: ["backend".to_string()].into_iter().collect(),
            parent: Some("PRJ-1".to_string()),
            on_hold_by: None,
        }
    }

    #[test]
    fn test_issue_predicates() {
        let issue = create_test_issue();
        assert!(issue.is_work_item());
        assert!(!issue.is_epic());
        assert!(issue.is_in_progress());
        assert!(!issue.is_done());
        assert!(issue.is_on_hold());
        assert!(!issue.is_blocked());
        assert!(issue.is_high_priority());
        assert!(!issue.is_unassigned());
        assert_eq!(issue.title(), "PRJ-42: Migrate billing service");
    }

    #[test]
    fn test_blocked_by_label_or_status_name() {
        let mut issue = create_test_issue();
        issue.labels.insert("blocked".to_string());
        assert!(issue.is_blocked());

        let mut issue = create_test_issue();
        issue.status = IssueStatus::new("BLOCKED by vendor", StatusCategory::Indeterminate);
        assert!(issue.is_blocked());
    }

    #[test]
    fn test_story_points_default_applies_only_when_absent() {
        let mut issue = create_test_issue();
        assert_eq!(issue.story_points_or(0.0), 5.0);
        issue.story_points = None;
        assert_eq!(issue.story_points_or(0.0), 0.0);
        assert_eq!(issue.story_points_or(3.0), 3.0);
    }

    #[test]
    fn test_missing_optional_fields_labels() {
        let mut issue = create_test_issue();
        issue.assignee = None;
        issue.priority = None;
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.priority_label(), "Not set");
        assert!(!issue.is_high_priority());
        assert!(issue.is_unassigned());
    }

    #[test]
    fn test_parse_due_date_accepts_date_and_timestamp() {
        let from_date = parse_due_date("2024-01-01").unwrap();
        assert_eq!(from_date, Timestamp::from_second(1704067200).unwrap());

        let from_ts = parse_due_date("2024-01-01T06:00:00Z").unwrap();
        assert_eq!(from_ts.as_second() - from_date.as_second(), 6 * 3600);

        assert!(parse_due_date("next tuesday").is_err());
    }

    #[test]
    fn test_issue_json_round_trip_uses_camel_case() {
        let issue = create_test_issue();
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["issueType"], "Story");
        assert_eq!(json["storyPoints"], 5.0);
        assert_eq!(json["assignee"]["displayName"], "Ada Lovelace");
        assert_eq!(json["dueDate"], "2024-01-01T00:00:00Z");
        assert!(json.get("onHoldBy").is_none());

        let back: Issue = serde_json::from_value(json).unwrap();
        assert_eq!(back, issue);
    }

    #[test]
    fn test_minimal_issue_deserializes() {
        let json = r#"{
            "id": "1",
            "key": "PRJ-1",
            "summary": "Bare",
            "status": { "name": "To Do", "category": "new" },
            "issueType": "Bug"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.due_date.is_none());
        assert!(issue.story_points.is_none());
        assert!(issue.labels.is_empty());
        assert!(issue.assignee.is_none());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(Priority::from_str("HIGHEST"), Ok(Priority::Highest));
        assert!(Priority::from_str("urgent").is_err());
        assert_eq!(IssueType::from_str("bug"), Ok(IssueType::Bug));
        assert!(IssueType::from_str("Sub-task").is_err());
        assert_eq!(
            StatusCategory::from_str("indeterminate"),
            Ok(StatusCategory::Indeterminate)
        );
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(24), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(74), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(75), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn test_urgency_rank_orders_immediate_first() {
        let mut urgencies = vec![Urgency::Upcoming, Urgency::Immediate, Urgency::Today];
        urgencies.sort_by_key(|u| u.rank());
        assert_eq!(
            urgencies,
            vec![Urgency::Immediate, Urgency::Today, Urgency::Upcoming]
        );
    }
}
