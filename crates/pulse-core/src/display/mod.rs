//! Markdown formatting for reports, queues and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and results are wrapped in newtypes so the same data can be
//! rendered as a list in one context and as a detail view in another. All
//! output is markdown, rendered rich or plain by the CLI and passed through
//! unchanged by the MCP server.
//!
//! ## Module Organization
//!
//! - [`collections`]: Projects, follow-up queue, escalation list, settings
//! - [`results`]: Notification outcomes
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use pulse_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("Stored setting hourly_rate".to_string());
//! assert!(success.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Escalations, FollowUps, Projects, SettingRow, SettingsView};
pub use datetime::LocalDateTime;
pub use results::NotificationResult;
pub use status::OperationStatus;
