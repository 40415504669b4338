//! Request and context for the chat-completion assistant.
//!
//! The assistant backend is an external collaborator. This module only
//! guarantees that what it receives is a faithful serialization of the
//! current [`ProjectHealth`].

use serde::{Deserialize, Serialize};

use crate::{config::CostRates, error::Result, models::ProjectHealth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: Role,
    pub content: String,
}

impl AssistantMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body sent to the chat-completion backend: `{messages, context}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub messages: Vec<AssistantMessage>,
    pub context: ProjectHealth,
}

impl AssistantRequest {
    pub fn new(context: ProjectHealth, messages: Vec<AssistantMessage>) -> Self {
        Self { messages, context }
    }

    /// Append a user question to the conversation.
    pub fn ask(mut self, question: impl Into<String>) -> Self {
        self.messages.push(AssistantMessage::user(question));
        self
    }

    /// The full message list with the system prompt in front.
    pub fn with_system_prompt(&self, rates: &CostRates) -> Result<Vec<AssistantMessage>> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(AssistantMessage {
            role: Role::System,
            content: system_prompt(&self.context, rates)?,
        });
        messages.extend(self.messages.iter().cloned());
        Ok(messages)
    }
}

/// Backend answer: `{response}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
}

/// System prompt embedding the pretty-printed health context.
pub fn system_prompt(health: &ProjectHealth, rates: &CostRates) -> Result<String> {
    let context = serde_json::to_string_pretty(health)?;
    Ok(format!(
        "You are a project management assistant with access to live project data. \
         You help analyze:\n\
         - Schedule: epic and story completion, delays and deadlines\n\
         - Cost: budget derived from story points ({rate}/hour, {hours} hours per story point)\n\
         - Risk: blockers, overdue items and priority issues\n\
         - Escalation: items needing management attention\n\
         - Follow-ups: items requiring action\n\n\
         Current project context:\n{context}\n\n\
         Give actionable insights. Be concise but thorough and reference issue keys when relevant.",
        rate = rates.hourly_rate,
        hours = rates.hours_per_story_point,
    ))
}
