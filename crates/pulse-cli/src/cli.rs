//! Command argument wrappers and their handlers.
//!
//! Each clap argument struct converts into a `pulse_core::params` type so
//! that the core stays free of clap. [`Cli`] then calls the monitor and
//! renders the returned display wrapper.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::Timestamp;
use log::debug;
use pulse_core::{
    display::{NotificationResult, OperationStatus},
    notify::{Channel, NotificationKind},
    params::{AssistantContext, ProjectKey, SendNotification, SetSetting, UnsetSetting},
    Monitor,
};

use crate::renderer::TerminalRenderer;

/// A project selected by key
#[derive(Args)]
pub struct ProjectArgs {
    /// Project key, e.g. PRJ
    pub project: String,
}

impl From<ProjectArgs> for ProjectKey {
    fn from(val: ProjectArgs) -> Self {
        ProjectKey {
            project: val.project,
        }
    }
}

/// Show the health report of a project
#[derive(Args)]
pub struct HealthArgs {
    /// Project key, e.g. PRJ
    pub project: String,
    /// Print the ProjectHealth JSON instead of the markdown report
    #[arg(long)]
    pub json: bool,
}

impl From<&HealthArgs> for ProjectKey {
    fn from(val: &HealthArgs) -> Self {
        ProjectKey {
            project: val.project.clone(),
        }
    }
}

/// Build the assistant request for a project
#[derive(Args)]
pub struct ContextArgs {
    /// Project key, e.g. PRJ
    pub project: String,
    /// Question to append as the user message
    #[arg(short, long)]
    pub question: Option<String>,
}

impl From<ContextArgs> for AssistantContext {
    fn from(val: ContextArgs) -> Self {
        AssistantContext {
            project: val.project,
            question: val.question,
        }
    }
}

/// Which list the issue is taken from
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    FollowUp,
    Escalation,
}

impl From<KindArg> for NotificationKind {
    fn from(val: KindArg) -> Self {
        match val {
            KindArg::FollowUp => NotificationKind::FollowUp,
            KindArg::Escalation => NotificationKind::Escalation,
        }
    }
}

/// Delivery channel
#[derive(Clone, Copy, ValueEnum)]
pub enum ChannelArg {
    Email,
    #[value(alias = "teams")]
    Chat,
}

impl From<ChannelArg> for Channel {
    fn from(val: ChannelArg) -> Self {
        match val {
            ChannelArg::Email => Channel::Email,
            ChannelArg::Chat => Channel::Chat,
        }
    }
}

/// Send a notification for a flagged issue
///
/// The issue must currently be in the follow-up queue (`--kind follow-up`) or
/// the escalation list (`--kind escalation`) of the project. Exactly one send
/// is attempted over the chosen channel.
#[derive(Args)]
pub struct NotifyArgs {
    /// Project key, e.g. PRJ
    pub project: String,
    /// Key of the flagged issue, e.g. PRJ-42
    pub issue_key: String,
    #[arg(long, value_enum)]
    pub kind: KindArg,
    #[arg(long, value_enum)]
    pub channel: ChannelArg,
    /// Custom text replacing the generated message body
    #[arg(short, long)]
    pub message: Option<String>,
}

impl From<NotifyArgs> for SendNotification {
    fn from(val: NotifyArgs) -> Self {
        SendNotification {
            project: val.project,
            issue_key: val.issue_key,
            kind: val.kind.into(),
            channel: val.channel.into(),
            message: val.message,
        }
    }
}

/// Store a setting
#[derive(Args)]
pub struct SetSettingArgs {
    /// Setting name, e.g. chat_webhook_url, email_api_key, from_email,
    /// from_name, manager_name, manager_email, hourly_rate,
    /// hours_per_story_point
    pub key: String,
    pub value: String,
}

impl From<SetSettingArgs> for SetSetting {
    fn from(val: SetSettingArgs) -> Self {
        SetSetting {
            key: val.key,
            value: val.value,
        }
    }
}

/// Remove a setting
#[derive(Args)]
pub struct UnsetSettingArgs {
    /// Setting name
    pub key: String,
}

impl From<UnsetSettingArgs> for UnsetSetting {
    fn from(val: UnsetSettingArgs) -> Self {
        UnsetSetting { key: val.key }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings; secrets are masked
    Show,
    /// Store a setting
    Set(SetSettingArgs),
    /// Remove a setting
    Unset(UnsetSettingArgs),
}

/// Command handlers over a monitor and a renderer.
pub struct Cli {
    monitor: Monitor,
    renderer: TerminalRenderer,
    now: Timestamp,
}

impl Cli {
    pub fn new(monitor: Monitor, renderer: TerminalRenderer, now: Timestamp) -> Self {
        Self {
            monitor,
            renderer,
            now,
        }
    }

    pub async fn list_projects(&self) -> Result<()> {
        let projects = self
            .monitor
            .projects()
            .await
            .context("Failed to list projects")?;

        self.renderer
            .render(&format!("# Projects ({})\n\n{projects}", projects.len()))
    }

    pub async fn health(&self, args: HealthArgs) -> Result<()> {
        let health = self
            .monitor
            .health(&ProjectKey::from(&args), self.now)
            .await
            .with_context(|| format!("Failed to compute health of {}", args.project))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&health)?);
            Ok(())
        } else {
            self.renderer.render(&health.to_string())
        }
    }

    pub async fn follow_ups(&self, args: ProjectArgs) -> Result<()> {
        let project = ProjectKey::from(args);
        let follow_ups = self
            .monitor
            .follow_ups(&project, self.now)
            .await
            .with_context(|| format!("Failed to compile follow-ups of {}", project.project))?;

        self.renderer.render(&format!(
            "# Follow-ups for {} ({})\n\n{follow_ups}",
            project.project,
            follow_ups.len()
        ))
    }

    pub async fn escalations(&self, args: ProjectArgs) -> Result<()> {
        let project = ProjectKey::from(args);
        let escalations = self
            .monitor
            .escalations(&project, self.now)
            .await
            .with_context(|| format!("Failed to classify escalations of {}", project.project))?;

        self.renderer.render(&format!(
            "# Escalations for {} (level {})\n\n{escalations}",
            project.project, escalations.0.level
        ))
    }

    pub async fn context(&self, args: ContextArgs) -> Result<()> {
        let params = AssistantContext::from(args);
        let request = self
            .monitor
            .assistant_context(&params, self.now)
            .await
            .with_context(|| format!("Failed to build assistant context for {}", params.project))?;

        println!("{}", serde_json::to_string_pretty(&request)?);
        Ok(())
    }

    /// A failed send is returned as an error so the process exits non-zero.
    pub async fn notify(&self, args: NotifyArgs) -> Result<()> {
        let params = SendNotification::from(args);
        debug!("notify: {params:?}");

        let outcome = self
            .monitor
            .notify(&params, self.now)
            .await
            .with_context(|| format!("Failed to notify about {}", params.issue_key))?;

        let result = NotificationResult::new(&params, outcome);
        if result.is_success() {
            self.renderer.render(&result.to_string())
        } else {
            Err(anyhow!(
                "{}",
                result.outcome.error.unwrap_or_else(|| "Send failed".to_string())
            ))
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => {
                let view = self
                    .monitor
                    .settings_view()
                    .await
                    .context("Failed to read settings")?;
                self.renderer.render(&view.to_string())
            }
            SettingsCommands::Set(args) => {
                let params = SetSetting::from(args);
                let entry = self
                    .monitor
                    .set_setting(&params)
                    .await
                    .with_context(|| format!("Failed to store setting {}", params.key))?;
                let status = OperationStatus::success(format!("Stored setting {}", entry.key));
                self.renderer.render(&status.to_string())
            }
            SettingsCommands::Unset(args) => {
                let params = UnsetSetting::from(args);
                let removed = self
                    .monitor
                    .unset_setting(&params)
                    .await
                    .with_context(|| format!("Failed to remove setting {}", params.key))?;
                let status = if removed {
                    OperationStatus::success(format!("Removed setting {}", params.key))
                } else {
                    OperationStatus::failure(format!("Setting {} was not set", params.key))
                };
                self.renderer.render(&status.to_string())
            }
        }
    }
}
