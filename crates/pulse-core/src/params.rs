//! Parameter structures for pulse operations.
//!
//! These are shared by the CLI and the MCP server. Each interface wraps them
//! with its own framework derives (`clap::Args` on the CLI side, a transparent
//! serde wrapper on the MCP side) and converts into the core type before
//! calling [`crate::Monitor`].
//!
//! ```ignore
//! // In pulse-cli/src/cli.rs
//! #[derive(Args)]
//! pub struct ProjectArgs {
//!     pub project: String,
//! }
//!
//! impl From<ProjectArgs> for ProjectKey {
//!     fn from(val: ProjectArgs) -> Self {
//!         ProjectKey { project: val.project }
//!     }
//! }
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::notify::{Channel, NotificationKind};

/// Parameters for operations scoped to one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProjectKey {
    /// Project key, e.g. `PRJ`
    pub project: String,
}

/// Parameters for building the assistant request of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AssistantContext {
    /// Project key
    pub project: String,
    /// Optional question appended as the user message
    #[serde(default)]
    pub question: Option<String>,
}

/// Parameters for notifying about one flagged issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SendNotification {
    /// Project key
    pub project: String,
    /// Key of the flagged issue, e.g. `PRJ-42`
    pub issue_key: String,
    /// Whether the issue is taken from the follow-up queue or the escalation
    /// list
    pub kind: NotificationKind,
    /// Delivery channel
    pub channel: Channel,
    /// Replaces the generated message body when given
    #[serde(default)]
    pub message: Option<String>,
}

/// Parameters for storing a setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetSetting {
    /// Setting name, e.g. `chat_webhook_url` or `hourly_rate`
    pub key: String,
    pub value: String,
}

/// Parameters for removing a setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UnsetSetting {
    /// Setting name
    pub key: String,
}
