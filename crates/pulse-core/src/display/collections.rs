//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles its empty case and formats its elements with their
//! own `Display` implementations.

use std::{fmt, ops::Index};

use jiff::Timestamp;
use serde::Serialize;

use super::datetime::LocalDateTime;
use crate::{
    config::SettingKey,
    db::SettingEntry,
    models::{EscalationMetrics, FollowUpItem, Project},
};

/// Newtype wrapper for displaying the projects of the issue source.
///
/// # Examples
///
/// ```rust
/// use pulse_core::{display::Projects, models::Project};
///
/// let projects = Projects(vec![Project {
///     id: "1".to_string(),
///     key: "PRJ".to_string(),
///     name: "Payments".to_string(),
///     project_type_key: None,
/// }]);
/// assert!(projects.to_string().contains("## Payments (PRJ)"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Projects(pub Vec<Project>);

impl Projects {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.0.iter()
    }
}

impl Index<usize> for Projects {
    type Output = Project;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Projects {
    type Item = Project;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Projects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No projects found.")
        } else {
            for project in &self.0 {
                write!(f, "{project}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a follow-up queue, most urgent first.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FollowUps(pub Vec<FollowUpItem>);

impl FollowUps {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FollowUpItem> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FollowUps {
    type Item = &'a FollowUpItem;
    type IntoIter = std::slice::Iter<'a, FollowUpItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FollowUps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No follow-ups needed.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

/// Escalated items followed by the items trending toward escalation.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Escalations(pub EscalationMetrics);

impl Escalations {
    /// True when nothing is escalated or pending.
    pub fn is_empty(&self) -> bool {
        self.0.escalated_items.is_empty() && self.0.pending_escalations.is_empty()
    }
}

impl fmt::Display for Escalations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No escalations.");
        }

        for item in &self.0.escalated_items {
            write!(f, "{item}")?;
        }

        if !self.0.pending_escalations.is_empty() {
            writeln!(f, "## Pending escalation")?;
            writeln!(f)?;
            for issue in &self.0.pending_escalations {
                writeln!(f, "- {} ({})", issue.title(), issue.assignee_name())?;
            }
        }
        Ok(())
    }
}

/// A recognized setting with its stored value, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingRow {
    pub key: SettingKey,
    pub value: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl SettingRow {
    /// Value as shown to the user; secrets keep only their last four
    /// characters.
    pub fn display_value(&self) -> String {
        match &self.value {
            None => "(not set)".to_string(),
            Some(value) if self.key.is_secret() => mask(value),
            Some(value) => value.clone(),
        }
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Every recognized setting in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView(pub Vec<SettingRow>);

impl SettingsView {
    /// Builds one row per [`SettingKey`]; stored keys this build does not
    /// know are left out.
    pub fn from_entries(entries: &[SettingEntry]) -> Self {
        let rows = SettingKey::ALL
            .into_iter()
            .map(|key| {
                let entry = entries.iter().find(|e| e.key == key.as_str());
                SettingRow {
                    key,
                    value: entry.map(|e| e.value.clone()),
                    updated_at: entry.map(|e| e.updated_at),
                }
            })
            .collect();
        Self(rows)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SettingRow> {
        self.0.iter()
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Settings")?;
        writeln!(f)?;
        for row in &self.0 {
            write!(f, "- **{}**: {}", row.key, row.display_value())?;
            if let Some(updated_at) = &row.updated_at {
                write!(f, " (updated {})", LocalDateTime(updated_at))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_view_masks_secrets() {
        let entries = vec![
            SettingEntry {
                key: "email_api_key".to_string(),
                value: "SG.abcdefghijklmnop".to_string(),
                updated_at: Timestamp::UNIX_EPOCH,
            },
            SettingEntry {
                key: "from_email".to_string(),
                value: "bot@example.com".to_string(),
                updated_at: Timestamp::UNIX_EPOCH,
            },
            SettingEntry {
                key: "legacy_theme".to_string(),
                value: "dark".to_string(),
                updated_at: Timestamp::UNIX_EPOCH,
            },
        ];

        let view = SettingsView::from_entries(&entries);
        assert_eq!(view.0.len(), SettingKey::ALL.len());

        let output = view.to_string();
        assert!(output.contains("- **email_api_key**: ****mnop"));
        assert!(!output.contains("SG.abcdefghijklmnop"));
        assert!(output.contains("- **from_email**: bot@example.com"));
        assert!(output.contains("- **chat_webhook_url**: (not set)"));
        assert!(!output.contains("legacy_theme"));
    }

    #[test]
    fn test_short_secret_fully_masked() {
        assert_eq!(mask("abc"), "********");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Projects(vec![]).to_string(), "No projects found.\n");
        assert_eq!(FollowUps(vec![]).to_string(), "No follow-ups needed.\n");
    }
}
