//! Error handling utilities for MCP server

use pulse_core::PulseError;
use rmcp::ErrorData;

/// Convert a pulse error into an MCP error. Lookup and validation failures
/// are the caller's to fix and map to invalid params.
pub fn to_mcp_error(message: &str, error: &PulseError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PulseError::ProjectNotFound { .. }
        | PulseError::IssueNotFlagged { .. }
        | PulseError::InvalidInput { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
