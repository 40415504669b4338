//! Notification operations for the Monitor.

use jiff::Timestamp;

use super::Monitor;
use crate::{
    error::Result,
    notify::{DispatchOutcome, FlaggedItem},
    params::SendNotification,
};

impl Monitor {
    /// Sends a follow-up or escalation for one flagged issue.
    ///
    /// Lookup problems (unknown project, issue not flagged for `kind`) are
    /// returned as errors. Everything that happens once the item is found,
    /// missing channel settings included, is reported in the outcome.
    pub async fn notify(&self, params: &SendNotification, now: Timestamp) -> Result<DispatchOutcome> {
        let settings = self.settings().await?;
        let health = self.health_with(&settings, &params.project, now).await?;
        let item = FlaggedItem::find(&health, &params.issue_key, params.kind)?;

        Ok(self
            .dispatcher
            .dispatch(
                &item,
                params.channel,
                params.message.as_deref(),
                &settings.notifications,
            )
            .await)
    }
}
