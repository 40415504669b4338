//! Project selection and refresh session.
//!
//! A refresh is split in three steps so that callers can release their lock
//! around the fetch: [`Dashboard::begin_refresh`] issues a [`RefreshTicket`],
//! the caller fetches issues, and [`Dashboard::complete_refresh`] applies the
//! result only if the ticket is still current. Selecting another project or
//! starting a newer refresh makes older tickets stale.

use jiff::Timestamp;
use log::{debug, info, warn};

use crate::{
    error::{PulseError, Result},
    metrics::HealthEngine,
    models::{Issue, Project, ProjectHealth},
    source::IssueSource,
};

/// Identifies one in-flight refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    project_key: String,
    generation: u64,
}

impl RefreshTicket {
    pub fn project_key(&self) -> &str {
        &self.project_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Health recomputed from the fetched issues
    Applied,
    /// A newer selection or refresh superseded this one; result discarded
    Stale,
    /// The fetch failed; the previous health is kept
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    engine: HealthEngine,
    projects: Vec<Project>,
    selected: Option<String>,
    generation: u64,
    health: Option<ProjectHealth>,
    refreshed_at: Option<Timestamp>,
    last_error: Option<String>,
}

impl Dashboard {
    pub fn new(engine: HealthEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Replace the engine used by later refreshes, e.g. after the cost rates
    /// changed. Health already computed is kept until the next refresh.
    pub fn set_engine(&mut self, engine: HealthEngine) {
        self.engine = engine;
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let key = self.selected.as_deref()?;
        self.projects.iter().find(|p| p.key == key)
    }

    /// Health of the selected project, if a refresh has succeeded.
    pub fn health(&self) -> Option<&ProjectHealth> {
        self.health.as_ref()
    }

    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Switch to `project_key` and return the ticket for its first refresh.
    ///
    /// Health of the previous project is cleared; any in-flight refresh
    /// becomes stale.
    pub fn select(&mut self, project_key: &str) -> Result<RefreshTicket> {
        if !self.projects.is_empty() && !self.projects.iter().any(|p| p.key == project_key) {
            return Err(PulseError::ProjectNotFound {
                key: project_key.to_string(),
            });
        }

        if self.selected.as_deref() != Some(project_key) {
            info!("Selected project {project_key}");
            self.selected = Some(project_key.to_string());
            self.health = None;
            self.refreshed_at = None;
            self.last_error = None;
        }
        Ok(self.issue_ticket(project_key.to_string()))
    }

    /// Ticket for refreshing the current selection, `None` when nothing is
    /// selected.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        let key = self.selected.clone()?;
        Some(self.issue_ticket(key))
    }

    fn issue_ticket(&mut self, project_key: String) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket {
            project_key,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.generation
            && self.selected.as_deref() == Some(ticket.project_key.as_str())
    }

    /// Apply a fetch result for `ticket`, computing health as of `now`.
    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        fetched: Result<Vec<Issue>>,
        now: Timestamp,
    ) -> RefreshOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale refresh of {} (generation {}, current {})",
                ticket.project_key, ticket.generation, self.generation
            );
            return RefreshOutcome::Stale;
        }

        match fetched {
            Ok(issues) => {
                self.health = Some(self.engine.compute(&issues, now));
                self.refreshed_at = Some(now);
                self.last_error = None;
                RefreshOutcome::Applied
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Refresh of {} failed: {message}", ticket.project_key);
                self.last_error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Load the project list from `source`. The current project list is kept
    /// when the fetch fails.
    pub async fn load_projects<S: IssueSource>(&mut self, source: &S) -> Result<&[Project]> {
        let projects = source.projects().await?;
        self.projects = projects;
        Ok(&self.projects)
    }

    /// Begin, fetch and complete in one call, for callers that own the
    /// dashboard exclusively.
    pub async fn refresh<S: IssueSource>(&mut self, source: &S, now: Timestamp) -> RefreshOutcome {
        let Some(ticket) = self.begin_refresh() else {
            return RefreshOutcome::Failed("No project selected".to_string());
        };
        let fetched = source.issues(ticket.project_key()).await;
        self.complete_refresh(&ticket, fetched, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueStatus, IssueType, StatusCategory};

    fn project(key: &str) -> Project {
        Project {
            id: key.to_lowercase(),
            key: key.to_string(),
            name: format!("{key} project"),
            project_type_key: None,
        }
    }

    fn done_story(key: &str) -> Issue {
        Issue {
            id: key.to_string(),
            key: key.to_string(),
            summary: "Done".to_string(),
            status: IssueStatus::new("Done", StatusCategory::Done),
            priority: None,
            issue_type: IssueType::Story,
            assignee: None,
            due_date: None,
            story_points: None,
            labels: Default::default(),
            parent: None,
            on_hold_by: None,
        }
    }

    fn dashboard() -> Dashboard {
        let mut dashboard = Dashboard::default();
        dashboard.set_projects(vec![project("A"), project("B")]);
        dashboard
    }

    #[test]
    fn test_select_unknown_project() {
        let mut dashboard = dashboard();
        assert!(matches!(
            dashboard.select("C"),
            Err(PulseError::ProjectNotFound { .. })
        ));
        assert_eq!(dashboard.selected(), None);
    }

    #[test]
    fn test_stale_response_after_switch_is_discarded() {
        let mut dashboard = dashboard();
        let now = Timestamp::UNIX_EPOCH;

        let slow = dashboard.select("A").unwrap();
        let fast = dashboard.select("B").unwrap();

        assert_eq!(
            dashboard.complete_refresh(&fast, Ok(vec![done_story("B-1")]), now),
            RefreshOutcome::Applied
        );
        assert_eq!(
            dashboard.complete_refresh(&slow, Ok(vec![]), now),
            RefreshOutcome::Stale
        );

        let health = dashboard.health().unwrap();
        assert_eq!(health.schedule.completed_work_items, 1);
        assert_eq!(dashboard.selected_project().map(|p| p.name.as_str()), Some("B project"));
    }

    #[test]
    fn test_newer_refresh_supersedes_older() {
        let mut dashboard = dashboard();
        let now = Timestamp::UNIX_EPOCH;
        dashboard.select("A").unwrap();

        let first = dashboard.begin_refresh().unwrap();
        let second = dashboard.begin_refresh().unwrap();
        assert!(!dashboard.is_current(&first));
        assert_eq!(
            dashboard.complete_refresh(&first, Ok(vec![]), now),
            RefreshOutcome::Stale
        );
        assert_eq!(
            dashboard.complete_refresh(&second, Ok(vec![]), now),
            RefreshOutcome::Applied
        );
    }

    #[test]
    fn test_failure_keeps_previous_health() {
        let mut dashboard = dashboard();
        let now = Timestamp::UNIX_EPOCH;

        let ticket = dashboard.select("A").unwrap();
        dashboard.complete_refresh(&ticket, Ok(vec![done_story("A-1")]), now);
        let before = dashboard.health().cloned();

        let ticket = dashboard.begin_refresh().unwrap();
        let outcome = dashboard.complete_refresh(
            &ticket,
            Err(PulseError::source("connection reset")),
            now,
        );

        assert_eq!(
            outcome,
            RefreshOutcome::Failed("Issue source error: connection reset".to_string())
        );
        assert_eq!(dashboard.health().cloned(), before);
        assert_eq!(
            dashboard.last_error(),
            Some("Issue source error: connection reset")
        );
    }

    #[test]
    fn test_reselecting_same_project_keeps_health() {
        let mut dashboard = dashboard();
        let now = Timestamp::UNIX_EPOCH;
        let ticket = dashboard.select("A").unwrap();
        dashboard.complete_refresh(&ticket, Ok(vec![]), now);

        dashboard.select("A").unwrap();
        assert!(dashboard.health().is_some());

        dashboard.select("B").unwrap();
        assert!(dashboard.health().is_none());
    }

    #[test]
    fn test_refresh_without_selection() {
        let mut dashboard = dashboard();
        assert!(dashboard.begin_refresh().is_none());
    }
}
