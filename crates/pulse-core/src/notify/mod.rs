//! Notification dispatch for flagged follow-up and escalation items.
//!
//! The policy resolves recipients, composes the message and hands it to one
//! of two channel collaborators:
//!
//! - [`EmailChannel`], implemented over the SendGrid v3 API by
//!   [`SendGridMailer`]
//! - [`ChatChannel`], implemented for incoming chat webhooks by
//!   [`TeamsWebhook`]
//!
//! Settings are passed in at call time. A channel whose settings are missing
//! fails with [`crate::PulseError::NotConfigured`] before any network call.

mod channel;
mod dispatch;
mod message;
mod sendgrid;
mod teams;


pub use channel::{ChatChannel, ChatMessage, EmailChannel, EmailCredentials, EmailMessage};
pub use dispatch::{prepare, DispatchOutcome, Dispatcher, Outbound};
pub use message::{
    compose, escape_html, resolve_recipients, Channel, Composed, Fact, FlaggedItem,
    NotificationKind, Recipient, RecipientRole, ESCALATION_COLOR, FOLLOW_UP_COLOR,
};
pub use sendgrid::{SendGridMailer, SENDGRID_BASE_URL};
pub use teams::TeamsWebhook;
