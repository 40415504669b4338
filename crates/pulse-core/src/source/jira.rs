//! Jira REST issue shape and its conversion into [`Issue`].
//!
//! Only the fields the engine reads are modelled. Story points come from
//! `customfield_10016`, the Jira Cloud default for the estimate field.

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::{
    parse_due_date, Assignee, Issue, IssueStatus, IssueType, Priority, StatusCategory,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraFields {
    pub summary: String,
    pub status: JiraStatus,
    #[serde(default)]
    pub priority: Option<JiraNamed>,
    pub issuetype: JiraNamed,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub duedate: Option<String>,
    #[serde(default, rename = "customfield_10016")]
    pub story_points: Option<f64>,
    #[serde(default)]
    pub parent: Option<JiraParent>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraStatus {
    pub name: String,
    pub status_category: JiraStatusCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraStatusCategory {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraNamed {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraParent {
    pub key: String,
}

impl From<JiraUser> for Assignee {
    fn from(user: JiraUser) -> Self {
        Assignee {
            display_name: user.display_name,
            email: user.email_address,
        }
    }
}

impl TryFrom<JiraIssue> for Issue {
    type Error = String;

    /// Fails only for issue types the engine does not track (sub-tasks and
    /// custom types). Unparseable optional values are dropped with a warning.
    fn try_from(jira: JiraIssue) -> Result<Self, Self::Error> {
        let JiraIssue { id, key, fields } = jira;
        let issue_type: IssueType = fields
            .issuetype
            .name
            .parse()
            .map_err(|e| format!("{key}: {e}"))?;

        let category = fields
            .status
            .status_category
            .key
            .parse::<StatusCategory>()
            .unwrap_or_else(|e| {
                warn!("{key}: {e}, treating as new");
                StatusCategory::New
            });

        let priority = fields.priority.and_then(|p| match p.name.parse::<Priority>() {
            Ok(priority) => Some(priority),
            Err(e) => {
                warn!("{key}: {e}");
                None
            }
        });

        let due_date = fields
            .duedate
            .as_deref()
            .and_then(|raw| match parse_due_date(raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warn!("{key}: {e}");
                    None
                }
            });

        Ok(Issue {
            id,
            summary: fields.summary,
            status: IssueStatus::new(fields.status.name, category),
            priority,
            issue_type,
            assignee: fields.assignee.map(Assignee::from),
            due_date,
            story_points: fields.story_points.filter(|p| p.is_finite() && *p >= 0.0),
            labels: fields.labels.into_iter().collect::<BTreeSet<_>>(),
            parent: fields.parent.map(|p| p.key),
            on_hold_by: None,
            key,
        })
    }
}
