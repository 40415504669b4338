use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{
    channel::{ChatChannel, ChatMessage, EmailChannel, EmailCredentials, EmailMessage},
    message::{compose, resolve_recipients, Channel, FlaggedItem, Recipient},
    sendgrid::SendGridMailer,
    teams::TeamsWebhook,
};
use crate::{
    config::NotificationSettings,
    error::{PulseError, Result},
};

/// Result contract handed back to the caller of a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct DispatchOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

impl From<Result<()>> for DispatchOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => DispatchOutcome::sent(),
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }
}

/// A fully prepared send: configuration checked, recipients resolved and the
/// message composed. Building one never touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Email {
        credentials: EmailCredentials,
        message: EmailMessage,
    },
    Chat(ChatMessage),
}

impl Outbound {
    pub fn recipients(&self) -> Option<&[Recipient]> {
        match self {
            Outbound::Email { message, .. } => Some(&message.recipients),
            Outbound::Chat(_) => None,
        }
    }
}

fn not_configured(channel: Channel, setting: &'static str) -> PulseError {
    PulseError::NotConfigured {
        channel: channel.label(),
        setting,
    }
}

/// Escalations always include the manager, whatever the channel.
fn require_manager(
    item: &FlaggedItem,
    channel: Channel,
    settings: &NotificationSettings,
) -> Result<()> {
    match item {
        FlaggedItem::Escalation(_) if settings.manager.is_none() => {
            Err(not_configured(channel, "manager_email"))
        }
        _ => Ok(()),
    }
}

/// Check channel preconditions and compose the message for `item`.
///
/// Fails with [`PulseError::NotConfigured`] when the chosen channel lacks a
/// required setting, or when an escalation has no manager contact. There is
/// no fallback to the other channel.
pub fn prepare(
    item: &FlaggedItem,
    channel: Channel,
    custom_message: Option<&str>,
    settings: &NotificationSettings,
) -> Result<Outbound> {
    match channel {
        Channel::Chat => {
            let endpoint = settings
                .chat_endpoint()
                .ok_or_else(|| not_configured(channel, "chat_webhook_url"))?;
            require_manager(item, channel, settings)?;
            let composed = compose(item, channel, custom_message);
            Ok(Outbound::Chat(ChatMessage {
                endpoint: endpoint.to_string(),
                title: composed.subject,
                body_text: composed.body_text,
                color_hint: composed.color_hint.to_string(),
                facts: composed.facts,
            }))
        }
        Channel::Email => {
            let api_key = settings
                .email_api_key()
                .ok_or_else(|| not_configured(channel, "email_api_key"))?;
            let from_email = settings
                .from_email()
                .ok_or_else(|| not_configured(channel, "from_email"))?;
            require_manager(item, channel, settings)?;
            let recipients = resolve_recipients(item, settings)?;
            let composed = compose(item, channel, custom_message);
            Ok(Outbound::Email {
                credentials: EmailCredentials {
                    api_key: api_key.to_string(),
                    from_email: from_email.to_string(),
                    from_name: settings.from_name().to_string(),
                },
                message: EmailMessage {
                    recipients,
                    subject: composed.subject,
                    body_text: composed.body_text,
                    body_html: Some(composed.body_html),
                },
            })
        }
    }
}

/// Notification dispatch policy over a pair of channel collaborators.
///
/// Each call makes at most one delivery attempt. Failures are reported, never
/// retried and never redirected to another channel.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<E = SendGridMailer, C = TeamsWebhook> {
    email: E,
    chat: C,
}

impl<E: EmailChannel, C: ChatChannel> Dispatcher<E, C> {
    pub fn new(email: E, chat: C) -> Self {
        Self { email, chat }
    }

    /// Send `item` over `channel`, propagating configuration and delivery
    /// errors.
    pub async fn try_dispatch(
        &self,
        item: &FlaggedItem,
        channel: Channel,
        custom_message: Option<&str>,
        settings: &NotificationSettings,
    ) -> Result<()> {
        let outbound = prepare(item, channel, custom_message, settings)?;
        let key = &item.issue().key;
        info!("Sending {} for {key} via {channel}", item.kind());

        let result = match &outbound {
            Outbound::Email {
                credentials,
                message,
            } => self.email.send_email(credentials, message).await,
            Outbound::Chat(message) => self.chat.post_message(message).await,
        };

        if let Err(e) = &result {
            warn!("Failed to send {} for {key} via {channel}: {e}", item.kind());
        }
        result
    }

    /// [`Self::try_dispatch`] folded into the `{success, error}` contract.
    pub async fn dispatch(
        &self,
        item: &FlaggedItem,
        channel: Channel,
        custom_message: Option<&str>,
        settings: &NotificationSettings,
    ) -> DispatchOutcome {
        self.try_dispatch(item, channel, custom_message, settings)
            .await
            .into()
    }
}
