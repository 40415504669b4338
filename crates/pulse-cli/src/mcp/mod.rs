//! MCP server implementation for Pulse
//!
//! Exposes the dashboard session to AI assistants: select a project,
//! refresh it, read its health, follow-ups and escalations, build the
//! assistant context, and send notifications.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use pulse_core::{Dashboard, HealthEngine, Monitor};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{McpResult, ProjectKey, Question, SendNotification};

/// MCP server for Pulse
#[derive(Clone)]
pub struct PulseMcpServer {
    monitor: Arc<Monitor>,
    dashboard: Arc<Mutex<Dashboard>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PulseMcpServer {
    /// Create a server whose dashboard starts with the stored cost rates
    pub async fn new(monitor: Monitor) -> pulse_core::Result<Self> {
        let settings = monitor.settings().await?;
        let dashboard = Dashboard::new(HealthEngine::new(settings.engine_config()));

        Ok(Self {
            monitor: Arc::new(monitor),
            dashboard: Arc::new(Mutex::new(dashboard)),
            tool_router: Self::tool_router(),
        })
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.monitor.clone(), self.dashboard.clone())
    }

    #[tool(
        name = "list_projects",
        description = "List the projects available in the issue snapshot with their keys. Use a key with select_project."
    )]
    async fn list_projects(&self) -> McpResult {
        self.handlers().list_projects().await
    }

    #[tool(
        name = "select_project",
        description = "Select a project by key and compute its health. Any refresh still running for the previously selected project is discarded. Returns the full health report."
    )]
    async fn select_project(&self, params: Parameters<ProjectKey>) -> McpResult {
        self.handlers().select_project(params).await
    }

    #[tool(
        name = "refresh",
        description = "Re-read the issue snapshot for the selected project and recompute its health as of now. On failure the previous health is kept."
    )]
    async fn refresh(&self) -> McpResult {
        self.handlers().refresh().await
    }

    #[tool(
        name = "project_health",
        description = "Show the health report of the selected project: overall verdict, schedule, cost, risk score and factors, escalation level and follow-up counts."
    )]
    async fn project_health(&self) -> McpResult {
        self.handlers().project_health().await
    }

    #[tool(
        name = "follow_ups",
        description = "Show the follow-up queue of the selected project, most urgent first, with reason, due label, status and assignee for each issue."
    )]
    async fn follow_ups(&self) -> McpResult {
        self.handlers().follow_ups().await
    }

    #[tool(
        name = "escalations",
        description = "Show escalated items (overdue by more than 7 days, level 3 beyond 14 days) and items pending escalation (overdue 3 to 7 days) for the selected project."
    )]
    async fn escalations(&self) -> McpResult {
        self.handlers().escalations().await
    }

    #[tool(
        name = "assistant_context",
        description = "Return the chat-completion request for the selected project as JSON: {messages, context} where context is the full ProjectHealth. An optional question becomes the user message."
    )]
    async fn assistant_context(&self, params: Parameters<Question>) -> McpResult {
        self.handlers().assistant_context(params).await
    }

    #[tool(
        name = "send_notification",
        description = "Send a follow-up or escalation for one flagged issue over email or chat. The issue must be in the project's follow-up queue (kind=follow-up) or escalation list (kind=escalation). Exactly one attempt is made; a channel without settings fails immediately without falling back to the other channel. Escalations also require a manager contact (manager_email). An optional message replaces the generated body."
    )]
    async fn send_notification(&self, params: Parameters<SendNotification>) -> McpResult {
        self.handlers().send_notification(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PulseMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pulse".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Pulse reports the health of software projects from an issue snapshot and sends follow-up or escalation notifications.

## Workflow
1. `list_projects` to find project keys
2. `select_project` to compute the health of one project
3. `project_health`, `follow_ups` and `escalations` to inspect it; `refresh` to recompute
4. `send_notification` for an issue listed by `follow_ups` or `escalations`

## Notes
- Health is recomputed as of the moment of each refresh
- `assistant_context` returns the exact JSON a chat-completion backend receives
- Notification channels are configured with `pulse settings set` on the command line"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PulseMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Pulse MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
