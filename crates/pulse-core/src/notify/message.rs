//! Flagged items, recipients and message composition.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::NotificationSettings,
    error::{PulseError, Result},
    models::{Assignee, EscalationItem, FollowUpItem, Issue, ProjectHealth},
};

/// Theme color of follow-up chat cards.
pub const FOLLOW_UP_COLOR: &str = "0076D7";

/// Theme color of escalation chat cards.
pub const ESCALATION_COLOR: &str = "FF0000";

/// Delivery channel chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum Channel {
    Email,
    /// Incoming chat webhook (Microsoft Teams style)
    Chat,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Chat => "chat",
        }
    }

    /// Display name used in configuration errors.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Chat => "Chat",
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "chat" | "teams" => Ok(Channel::Chat),
            _ => Err(format!("Unknown channel: {s}")),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which list a flagged item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum NotificationKind {
    FollowUp,
    Escalation,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::FollowUp => "follow-up",
            NotificationKind::Escalation => "escalation",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "follow-up" | "followup" => Ok(NotificationKind::FollowUp),
            "escalation" => Ok(NotificationKind::Escalation),
            _ => Err(format!("Unknown notification kind: {s}")),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A follow-up or escalation item selected for notification.
#[derive(Debug, Clone, PartialEq)]
pub enum FlaggedItem {
    FollowUp(FollowUpItem),
    Escalation(EscalationItem),
}

impl FlaggedItem {
    /// Look up the item for `key` in the matching list of `health`.
    pub fn find(health: &ProjectHealth, key: &str, kind: NotificationKind) -> Result<Self> {
        let found = match kind {
            NotificationKind::FollowUp => health.follow_up(key).cloned().map(Self::FollowUp),
            NotificationKind::Escalation => health.escalation(key).cloned().map(Self::Escalation),
        };
        found.ok_or_else(|| PulseError::IssueNotFlagged {
            key: key.to_string(),
            action: kind.as_str().to_string(),
        })
    }

    pub fn issue(&self) -> &Issue {
        match self {
            FlaggedItem::FollowUp(item) => &item.issue,
            FlaggedItem::Escalation(item) => &item.issue,
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            FlaggedItem::FollowUp(_) => NotificationKind::FollowUp,
            FlaggedItem::Escalation(_) => NotificationKind::Escalation,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            FlaggedItem::FollowUp(item) => &item.reason,
            FlaggedItem::Escalation(item) => &item.reason,
        }
    }
}

/// Why a recipient receives the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecipientRole {
    Assignee,
    TicketOwner,
    Manager,
    OnHoldBy,
}

impl RecipientRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientRole::Assignee => "Assignee",
            RecipientRole::TicketOwner => "Ticket Owner",
            RecipientRole::Manager => "Manager",
            RecipientRole::OnHoldBy => "On Hold By",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub name: String,
    /// `None` for the unassigned placeholder
    pub email: Option<String>,
    pub role: RecipientRole,
}

impl Recipient {
    fn from_person(person: &Assignee, role: RecipientRole) -> Self {
        Self {
            name: person.display_name.clone(),
            email: person.email.clone(),
            role,
        }
    }

    fn unassigned(role: RecipientRole) -> Self {
        Self {
            name: "Unassigned".to_string(),
            email: None,
            role,
        }
    }
}

/// Who receives a notification for `item`.
///
/// Follow-ups go to the assignee. Escalations go to the ticket owner and the
/// configured manager, plus whoever put the issue on hold when that is known.
/// A missing assignee yields the "Unassigned" placeholder rather than
/// dropping the recipient.
///
/// # Errors
///
/// Returns [`PulseError::NotConfigured`] for an escalation when no manager
/// contact is set.
pub fn resolve_recipients(
    item: &FlaggedItem,
    settings: &NotificationSettings,
) -> Result<Vec<Recipient>> {
    let issue = item.issue();
    let owner = |role| {
        issue
            .assignee
            .as_ref()
            .map_or_else(|| Recipient::unassigned(role), |a| Recipient::from_person(a, role))
    };

    match item {
        FlaggedItem::FollowUp(_) => Ok(vec![owner(RecipientRole::Assignee)]),
        FlaggedItem::Escalation(_) => {
            let manager = settings
                .manager
                .as_ref()
                .ok_or(PulseError::NotConfigured {
                    channel: Channel::Email.label(),
                    setting: "manager_email",
                })?;

            let mut recipients = vec![
                owner(RecipientRole::TicketOwner),
                Recipient {
                    name: manager.name.clone(),
                    email: Some(manager.email.clone()),
                    role: RecipientRole::Manager,
                },
            ];
            if issue.is_on_hold() {
                if let Some(holder) = &issue.on_hold_by {
                    recipients.push(Recipient::from_person(holder, RecipientRole::OnHoldBy));
                }
            }
            Ok(recipients)
        }
    }
}

/// A labelled value shown on chat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Channel-neutral rendering of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
    pub color_hint: &'static str,
    pub facts: Vec<Fact>,
}

fn subject(item: &FlaggedItem) -> String {
    let title = item.issue().title();
    match item.kind() {
        NotificationKind::FollowUp => format!("[Follow-up] {title}"),
        NotificationKind::Escalation => format!("[ESCALATION] {title}"),
    }
}

fn follow_up_text(item: &FollowUpItem, channel: Channel) -> String {
    let issue = &item.issue;
    let name = issue.assignee.as_ref().map(|a| a.display_name.as_str());
    match channel {
        Channel::Email => format!(
            "Dear {},\n\n\
             This is a follow-up reminder for ticket {}.\n\n\
             Summary: {}\n\
             Reason: {}\n\
             Urgency: {}\n\
             Priority: {}\n\n\
             Please provide an update at your earliest convenience.\n\n\
             Best regards,\n\
             Project Management Team",
            name.unwrap_or("Team Member"),
            issue.key,
            issue.summary,
            item.reason,
            item.urgency.as_str(),
            issue.priority_label(),
        ),
        Channel::Chat => format!(
            "Hi {}, following up on {}: {}.\n\n\
             Reason: {}\n\
             Urgency: {}\n\n\
             Could you please provide an update?",
            name.unwrap_or("there"),
            issue.key,
            issue.summary,
            item.reason,
            item.urgency.as_str(),
        ),
    }
}

fn escalation_text(item: &EscalationItem) -> String {
    let issue = &item.issue;
    let mut lines = vec![
        format!("Escalation Alert: {}", issue.title()),
        String::new(),
        format!("Assignee: {}", issue.assignee_name()),
        format!(
            "Status: {}",
            if issue.is_on_hold() { "On Hold" } else { "Active" }
        ),
    ];
    if issue.is_on_hold() {
        if let Some(holder) = &issue.on_hold_by {
            lines.push(format!("On Hold By: {}", holder.display_name));
        }
    }
    lines.push(format!("Priority: {}", issue.priority_label()));
    lines.push(format!("Escalation Level: {}", item.level));
    lines.push(format!("Reason: {}", item.reason));
    lines.join("\n")
}

/// Minimal HTML escaping for text placed into the email body.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_body(heading: &str, color: &str, text: &str) -> String {
    let paragraphs: Vec<String> = text
        .split("\n\n")
        .map(|block| format!("<p>{}</p>", escape_html(block).replace('\n', "<br>")))
        .collect();
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">\
         <h2 style=\"color: #{color};\">{}</h2>{}</div>",
        escape_html(heading),
        paragraphs.join("")
    )
}

/// Render `item` for `channel`. A custom message replaces the default body
/// verbatim.
pub fn compose(item: &FlaggedItem, channel: Channel, custom_message: Option<&str>) -> Composed {
    let issue = item.issue();
    let subject = subject(item);
    let color_hint = match item.kind() {
        NotificationKind::FollowUp => FOLLOW_UP_COLOR,
        NotificationKind::Escalation => ESCALATION_COLOR,
    };

    let body_text = match custom_message.filter(|m| !m.trim().is_empty()) {
        Some(custom) => custom.to_string(),
        None => match item {
            FlaggedItem::FollowUp(follow_up) => follow_up_text(follow_up, channel),
            FlaggedItem::Escalation(escalation) => escalation_text(escalation),
        },
    };

    let facts = vec![
        Fact::new("Issue", issue.key.as_str()),
        Fact::new("Summary", issue.summary.as_str()),
        Fact::new("Status", issue.status.name.as_str()),
        Fact::new("Priority", issue.priority_label()),
        Fact::new("Assignee", issue.assignee_name()),
        Fact::new("Reason", item.reason()),
    ];

    Composed {
        body_html: html_body(&subject, color_hint, &body_text),
        subject,
        body_text,
        color_hint,
        facts,
    }
}
