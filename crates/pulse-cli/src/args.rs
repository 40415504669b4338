use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use crate::cli::{
    ContextArgs, HealthArgs, NotifyArgs, ProjectArgs, SettingsCommands,
};

/// Project health dashboard for the terminal
///
/// Pulse reads a snapshot of your issue tracker, reports schedule, cost,
/// risk, escalation and follow-up metrics per project, and sends follow-up
/// or escalation notifications by email or chat webhook. It also runs as an
/// MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "pulse")]
pub struct Args {
    /// Path to the SQLite settings database. Defaults to
    /// $XDG_DATA_HOME/pulse/pulse.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the issue snapshot JSON. Defaults to
    /// $XDG_DATA_HOME/pulse/snapshot.json
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Evaluate time-relative rules at this RFC 3339 instant instead of the
    /// current time
    #[arg(long, global = true)]
    pub now: Option<Timestamp>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Pulse CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List projects in the snapshot
    Projects,
    /// Show the full health report of a project
    Health(HealthArgs),
    /// Show the follow-up queue of a project
    #[command(name = "follow-ups", alias = "fu")]
    FollowUps(ProjectArgs),
    /// Show escalated and pending items of a project
    Escalations(ProjectArgs),
    /// Print the assistant request (messages and health context) as JSON
    Context(ContextArgs),
    /// Send a follow-up or escalation for one flagged issue
    Notify(NotifyArgs),
    /// Manage notification and cost settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Start the MCP server
    Serve,
}
