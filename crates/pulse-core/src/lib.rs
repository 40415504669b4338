//! Core library for the Pulse project health dashboard.
//!
//! Pulse reads a snapshot of issues from an issue source, derives a
//! [`ProjectHealth`] report from it (schedule, cost, risk, escalation and
//! follow-up metrics) and sends follow-up or escalation notifications over
//! email or a chat webhook.
//!
//! # Layers
//!
//! - [`metrics`]: the pure health engine, `issues + now -> ProjectHealth`
//! - [`notify`]: dispatch policy and the SendGrid/Teams channels
//! - [`source`]: the issue source trait and the JSON snapshot source
//! - [`db`]: SQLite settings store
//! - [`monitor`]: the facade used by the CLI and the MCP server
//! - [`dashboard`]: project selection with stale-refresh protection
//! - [`display`]: markdown formatting of everything above
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::Timestamp;
//! use pulse_core::{params::ProjectKey, MonitorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let monitor = MonitorBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .with_snapshot_path(Some("snapshot.json"))
//!     .build()
//!     .await?;
//!
//! for project in monitor.projects().await?.iter() {
//!     let key = ProjectKey { project: project.key.clone() };
//!     let health = monitor.health(&key, Timestamp::now()).await?;
//!     println!("{}: {}", project.name, health.overall);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod display;
pub mod error;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod params;
pub mod source;

// Re-export commonly used types
pub use assistant::{AssistantMessage, AssistantReply, AssistantRequest};
pub use config::{CostRates, EngineConfig, NotificationSettings, SettingKey, Settings};
pub use dashboard::{Dashboard, RefreshOutcome, RefreshTicket};
pub use db::Database;
pub use display::{LocalDateTime, OperationStatus};
pub use error::{PulseError, Result};
pub use metrics::{compute_health, HealthEngine};
pub use models::{Issue, OverallHealth, Project, ProjectHealth};
pub use monitor::{Monitor, MonitorBuilder};
pub use notify::{Channel, DispatchOutcome, Dispatcher, NotificationKind};
pub use source::{IssueSource, SnapshotSource};
