//! MCP tool handlers implementation

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, info};
use pulse_core::{
    assistant::AssistantRequest,
    display::{Escalations, FollowUps, LocalDateTime, NotificationResult},
    models::ProjectHealth,
    params as core, Dashboard, HealthEngine, IssueSource, Monitor, RefreshOutcome, RefreshTicket,
};
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Transparent MCP wrapper adding deserialization and a JSON schema to a
/// core parameter type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type ProjectKey = McpParams<core::ProjectKey>;
pub type SendNotification = McpParams<core::SendNotification>;

/// Parameters for the assistant context of the selected project
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct Question {
    /// Optional question appended as the user message
    #[serde(default)]
    pub question: Option<String>,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(body.into())])
}

/// Handler implementations for the MCP server.
///
/// The dashboard lock is only held to read or update session state, never
/// across a snapshot read or a notification send.
pub struct McpHandlers {
    monitor: Arc<Monitor>,
    dashboard: Arc<Mutex<Dashboard>>,
}

impl McpHandlers {
    pub fn new(monitor: Arc<Monitor>, dashboard: Arc<Mutex<Dashboard>>) -> Self {
        Self { monitor, dashboard }
    }

    pub async fn list_projects(&self) -> McpResult {
        let projects = self
            .monitor
            .projects()
            .await
            .map_err(|e| to_mcp_error("Failed to list projects", &e))?;

        self.dashboard.lock().await.set_projects(projects.0.clone());

        Ok(text(format!("# Projects ({})\n\n{projects}", projects.len())))
    }

    pub async fn select_project(&self, Parameters(params): Parameters<ProjectKey>) -> McpResult {
        debug!("select_project: {params:?}");

        let known = !self.dashboard.lock().await.projects().is_empty();
        if !known {
            let projects = self
                .monitor
                .projects()
                .await
                .map_err(|e| to_mcp_error("Failed to list projects", &e))?;
            self.dashboard.lock().await.set_projects(projects.0);
        }

        let ticket = self
            .dashboard
            .lock()
            .await
            .select(&params.as_ref().project)
            .map_err(|e| to_mcp_error("Failed to select project", &e))?;

        self.complete(ticket).await
    }

    pub async fn refresh(&self) -> McpResult {
        let ticket = self.dashboard.lock().await.begin_refresh().ok_or_else(|| {
            ErrorData::invalid_params("No project selected. Call select_project first", None)
        })?;

        self.complete(ticket).await
    }

    /// Fetch outside the lock, then apply the result if the ticket is still
    /// current.
    async fn complete(&self, ticket: RefreshTicket) -> McpResult {
        let key = ticket.project_key().to_string();
        let settings = self
            .monitor
            .settings()
            .await
            .map_err(|e| to_mcp_error("Failed to read settings", &e))?;
        let fetched = self.monitor.source().issues(&key).await;
        let now = Timestamp::now();

        let mut dashboard = self.dashboard.lock().await;
        dashboard.set_engine(HealthEngine::new(settings.engine_config()));

        match dashboard.complete_refresh(&ticket, fetched, now) {
            RefreshOutcome::Applied => {
                info!("Refreshed {key}");
                let health = dashboard
                    .health()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                Ok(text(format!(
                    "Refreshed {key} at {}\n\n{health}",
                    LocalDateTime(&now)
                )))
            }
            RefreshOutcome::Stale => Ok(text(format!(
                "Discarded the refresh of {key}: another project was selected meanwhile"
            ))),
            RefreshOutcome::Failed(message) => Err(ErrorData::internal_error(
                format!("Failed to refresh {key}: {message}"),
                None,
            )),
        }
    }

    async fn current_health(&self) -> Result<ProjectHealth, ErrorData> {
        let dashboard = self.dashboard.lock().await;
        if let Some(health) = dashboard.health() {
            return Ok(health.clone());
        }
        let message = match dashboard.selected() {
            None => "No project selected. Call select_project first".to_string(),
            Some(key) => match dashboard.last_error() {
                Some(error) => format!("No health available for {key}: {error}"),
                None => format!("No health available for {key}. Call refresh"),
            },
        };
        Err(ErrorData::invalid_params(message, None))
    }

    pub async fn project_health(&self) -> McpResult {
        let health = self.current_health().await?;
        Ok(text(health.to_string()))
    }

    pub async fn follow_ups(&self) -> McpResult {
        let health = self.current_health().await?;
        let follow_ups = FollowUps(health.follow_up.items);
        Ok(text(format!(
            "# Follow-ups ({})\n\n{follow_ups}",
            follow_ups.len()
        )))
    }

    pub async fn escalations(&self) -> McpResult {
        let health = self.current_health().await?;
        let escalations = Escalations(health.escalation);
        Ok(text(format!(
            "# Escalations (level {})\n\n{escalations}",
            escalations.0.level
        )))
    }

    pub async fn assistant_context(&self, Parameters(params): Parameters<Question>) -> McpResult {
        let health = self.current_health().await?;
        let request = AssistantRequest::new(health, Vec::new());
        let request = match params.question.as_deref().map(str::trim) {
            Some(question) if !question.is_empty() => request.ask(question),
            _ => request,
        };

        let json = serde_json::to_string_pretty(&request)
            .map_err(|e| ErrorData::internal_error(format!("Failed to serialize context: {e}"), None))?;
        Ok(text(json))
    }

    pub async fn send_notification(
        &self,
        Parameters(params): Parameters<SendNotification>,
    ) -> McpResult {
        debug!("send_notification: {params:?}");
        let params = params.as_ref();

        let outcome = self
            .monitor
            .notify(params, Timestamp::now())
            .await
            .map_err(|e| to_mcp_error("Failed to send notification", &e))?;

        let result = NotificationResult::new(params, outcome);
        let content = vec![Content::text(result.to_string())];
        Ok(if result.is_success() {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        })
    }
}
