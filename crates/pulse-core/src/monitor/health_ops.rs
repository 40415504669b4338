//! Health report operations for the Monitor.

use jiff::Timestamp;
use log::debug;

use super::Monitor;
use crate::{
    assistant::AssistantRequest,
    config::Settings,
    display::{Escalations, FollowUps, Projects},
    error::Result,
    metrics::HealthEngine,
    models::ProjectHealth,
    params::{AssistantContext, ProjectKey},
    source::IssueSource,
};

impl Monitor {
    /// Projects known to the issue source.
    pub async fn projects(&self) -> Result<Projects> {
        let projects = self.source.projects().await?;
        Ok(Projects(projects))
    }

    /// Computes the health of a project as of `now`, using the cost rates
    /// currently stored in the settings.
    pub async fn health(&self, params: &ProjectKey, now: Timestamp) -> Result<ProjectHealth> {
        let settings = self.settings().await?;
        self.health_with(&settings, &params.project, now).await
    }

    pub(crate) async fn health_with(
        &self,
        settings: &Settings,
        project: &str,
        now: Timestamp,
    ) -> Result<ProjectHealth> {
        let issues = self.source.issues(project).await?;
        debug!("Fetched {} issues for {project}", issues.len());

        Ok(HealthEngine::new(settings.engine_config()).compute(&issues, now))
    }

    /// The follow-up queue of a project.
    pub async fn follow_ups(&self, params: &ProjectKey, now: Timestamp) -> Result<FollowUps> {
        let health = self.health(params, now).await?;
        Ok(FollowUps(health.follow_up.items))
    }

    /// Escalated and pending items of a project.
    pub async fn escalations(&self, params: &ProjectKey, now: Timestamp) -> Result<Escalations> {
        let health = self.health(params, now).await?;
        Ok(Escalations(health.escalation))
    }

    /// The request handed to the chat-completion backend, with the optional
    /// question as the only user message.
    pub async fn assistant_context(
        &self,
        params: &AssistantContext,
        now: Timestamp,
    ) -> Result<AssistantRequest> {
        let project = ProjectKey {
            project: params.project.clone(),
        };
        let health = self.health(&project, now).await?;

        let request = AssistantRequest::new(health, Vec::new());
        Ok(match params.question.as_deref().map(str::trim) {
            Some(question) if !question.is_empty() => request.ask(question),
            _ => request,
        })
    }
}
