//! Project descriptor returned by the issue source.

use serde::{Deserialize, Serialize};

/// A project known to the issue source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,

    /// Key used to request the project's issues
    pub key: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type_key: Option<String>,
}
