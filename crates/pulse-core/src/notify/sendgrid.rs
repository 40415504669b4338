//! SendGrid v3 mail client.

use std::{collections::HashSet, time::Duration};

use log::{debug, warn};
use serde::Serialize;

use super::channel::{EmailChannel, EmailCredentials, EmailMessage};
use crate::error::{PulseError, Result};

pub const SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct SendGridMailer {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for SendGridMailer {
    fn default() -> Self {
        Self::new(SENDGRID_BASE_URL)
    }
}

impl SendGridMailer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct MailSend<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

fn build_payload<'a>(
    credentials: &'a EmailCredentials,
    message: &'a EmailMessage,
) -> Result<MailSend<'a>> {
    let mut seen = HashSet::new();
    let to: Vec<Address<'a>> = message
        .recipients
        .iter()
        .filter_map(|r| {
            r.email
                .as_deref()
                .filter(|email| !email.trim().is_empty())
                .map(|email| Address {
                    email,
                    name: &r.name,
                })
        })
        .filter(|address| seen.insert(address.email.to_lowercase()))
        .collect();

    if to.is_empty() {
        return Err(PulseError::delivery("No recipient has an email address"));
    }

    let mut content = vec![Content {
        mime: "text/plain",
        value: &message.body_text,
    }];
    if let Some(html) = &message.body_html {
        content.push(Content {
            mime: "text/html",
            value: html,
        });
    }

    Ok(MailSend {
        personalizations: vec![Personalization { to }],
        from: Address {
            email: &credentials.from_email,
            name: &credentials.from_name,
        },
        subject: &message.subject,
        content,
    })
}

impl EmailChannel for SendGridMailer {
    async fn send_email(&self, credentials: &EmailCredentials, message: &EmailMessage) -> Result<()> {
        let payload = build_payload(credentials, message)?;
        let url = format!("{}/v3/mail/send", self.base_url);
        debug!(
            "Sending email '{}' to {} recipient(s)",
            message.subject,
            payload.personalizations[0].to.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&credentials.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PulseError::delivery(format!("Failed to reach SendGrid: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("SendGrid rejected the message ({status}): {body}");
        Err(PulseError::delivery(format!(
            "SendGrid error: {}",
            status.as_u16()
        )))
    }
}
