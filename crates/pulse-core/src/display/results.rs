//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use super::status::OperationStatus;
use crate::{notify::DispatchOutcome, params::SendNotification};

/// Wrapper type for displaying the outcome of a notification send.
///
/// # Examples
///
/// ```rust
/// use pulse_core::{
///     display::NotificationResult,
///     notify::{Channel, DispatchOutcome, NotificationKind},
///     params::SendNotification,
/// };
///
/// let params = SendNotification {
///     project: "PRJ".to_string(),
///     issue_key: "PRJ-2".to_string(),
///     kind: NotificationKind::Escalation,
///     channel: Channel::Chat,
///     message: None,
/// };
/// let result = NotificationResult::new(&params, DispatchOutcome::sent());
/// assert_eq!(result.to_string(), "Success: Sent escalation for PRJ-2 via chat\n");
/// ```
pub struct NotificationResult {
    pub issue_key: String,
    pub description: String,
    pub outcome: DispatchOutcome,
}

impl NotificationResult {
    pub fn new(params: &SendNotification, outcome: DispatchOutcome) -> Self {
        Self {
            issue_key: params.issue_key.clone(),
            description: format!("{} for {} via {}", params.kind, params.issue_key, params.channel),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.success
    }

    fn status(&self) -> OperationStatus {
        if self.outcome.success {
            OperationStatus::success(format!("Sent {}", self.description))
        } else {
            let error = self.outcome.error.as_deref().unwrap_or("unknown error");
            OperationStatus::failure(format!("Could not send {}: {error}", self.description))
        }
    }
}

impl fmt::Display for NotificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status())
    }
}
