//! Incoming-webhook chat client posting legacy MessageCards.

use std::time::Duration;

use log::{debug, warn};
use serde_json::{json, Value};

use super::channel::{ChatChannel, ChatMessage};
use crate::error::{PulseError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct TeamsWebhook {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for TeamsWebhook {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TeamsWebhook {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub(crate) fn message_card(message: &ChatMessage) -> Value {
    json!({
        "@type": "MessageCard",
        "@context": "http://schema.org/extensions",
        "themeColor": message.color_hint,
        "summary": message.title,
        "sections": [{
            "activityTitle": message.title,
            "text": message.body_text,
            "facts": message.facts,
            "markdown": true
        }]
    })
}

impl ChatChannel for TeamsWebhook {
    async fn post_message(&self, message: &ChatMessage) -> Result<()> {
        debug!("Posting chat card '{}'", message.title);

        let response = self
            .client
            .post(&message.endpoint)
            .json(&message_card(message))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PulseError::delivery(format!("Failed to reach chat webhook: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Chat webhook rejected the card ({status}): {body}");
        Err(PulseError::delivery(format!(
            "Chat webhook error: {}",
            status.as_u16()
        )))
    }
}
