//! Collaborator contracts for the delivery channels.

use std::future::Future;

use super::message::{Fact, Recipient};
use crate::error::Result;

/// Sender identity and credentials, taken from settings at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCredentials {
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipients: Vec<Recipient>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Webhook URL, never empty
    pub endpoint: String,
    pub title: String,
    pub body_text: String,
    /// Hex color without the leading `#`
    pub color_hint: String,
    pub facts: Vec<Fact>,
}

/// Sends email. Implementations make exactly one attempt and report the
/// provider's failure as [`crate::PulseError::Delivery`].
pub trait EmailChannel {
    fn send_email(
        &self,
        credentials: &EmailCredentials,
        message: &EmailMessage,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Posts a card to a chat webhook. Same single-attempt contract as
/// [`EmailChannel`].
pub trait ChatChannel {
    fn post_message(&self, message: &ChatMessage) -> impl Future<Output = Result<()>> + Send;
}
