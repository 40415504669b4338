//! Explicit configuration objects.
//!
//! Configuration is passed by value into the engine and the dispatch policy
//! at call time. Persistence is owned by the application through
//! [`crate::db::Database`]; nothing in here reads global state.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Currency per hour of work.
pub const DEFAULT_HOURLY_RATE: f64 = 40.0;

/// Hours of work represented by one story point.
pub const DEFAULT_HOURS_PER_STORY_POINT: f64 = 8.0;

/// Story points assumed for issues that carry none.
pub const DEFAULT_STORY_POINTS: f64 = 0.0;

pub const DEFAULT_FROM_NAME: &str = "Project Health Bot";

/// Fixed conversion from story points to cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRates {
    pub hourly_rate: f64,
    pub hours_per_story_point: f64,
}

impl CostRates {
    /// Cost of the given number of story points.
    pub fn cost_of(&self, story_points: f64) -> f64 {
        story_points * self.hours_per_story_point * self.hourly_rate
    }
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
            hours_per_story_point: DEFAULT_HOURS_PER_STORY_POINT,
        }
    }
}

/// Tunables of the metrics engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub rates: CostRates,
    pub default_story_points: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rates: CostRates::default(),
            default_story_points: DEFAULT_STORY_POINTS,
        }
    }
}

/// A named person with an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// Notification channel configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub chat_webhook_url: Option<String>,
    pub email_api_key: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    /// Always copied on escalations
    pub manager: Option<Contact>,
}

impl NotificationSettings {
    /// Webhook endpoint, if set to something non-blank.
    pub fn chat_endpoint(&self) -> Option<&str> {
        non_blank(self.chat_webhook_url.as_deref())
    }

    pub fn email_api_key(&self) -> Option<&str> {
        non_blank(self.email_api_key.as_deref())
    }

    pub fn from_email(&self) -> Option<&str> {
        non_blank(self.from_email.as_deref())
    }

    pub fn from_name(&self) -> &str {
        non_blank(self.from_name.as_deref()).unwrap_or(DEFAULT_FROM_NAME)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Recognized keys of the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ChatWebhookUrl,
    EmailApiKey,
    FromEmail,
    FromName,
    ManagerName,
    ManagerEmail,
    HourlyRate,
    HoursPerStoryPoint,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::ChatWebhookUrl,
        SettingKey::EmailApiKey,
        SettingKey::FromEmail,
        SettingKey::FromName,
        SettingKey::ManagerName,
        SettingKey::ManagerEmail,
        SettingKey::HourlyRate,
        SettingKey::HoursPerStoryPoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ChatWebhookUrl => "chat_webhook_url",
            SettingKey::EmailApiKey => "email_api_key",
            SettingKey::FromEmail => "from_email",
            SettingKey::FromName => "from_name",
            SettingKey::ManagerName => "manager_name",
            SettingKey::ManagerEmail => "manager_email",
            SettingKey::HourlyRate => "hourly_rate",
            SettingKey::HoursPerStoryPoint => "hours_per_story_point",
        }
    }

    /// Secrets are masked when settings are displayed.
    pub fn is_secret(&self) -> bool {
        matches!(self, SettingKey::EmailApiKey)
    }

    /// Check that `value` is acceptable for this key.
    pub fn validate(&self, value: &str) -> Result<()> {
        match self {
            SettingKey::HourlyRate | SettingKey::HoursPerStoryPoint => {
                parse_rate(*self, value).map(|_| ())
            }
            SettingKey::ChatWebhookUrl => {
                if value.starts_with("http://") || value.starts_with("https://") {
                    Ok(())
                } else {
                    Err(PulseError::invalid_input(self.as_str())
                        .with_reason("Webhook URL must start with http:// or https://"))
                }
            }
            SettingKey::FromEmail | SettingKey::ManagerEmail => {
                if value.contains('@') {
                    Ok(())
                } else {
                    Err(PulseError::invalid_input(self.as_str())
                        .with_reason(format!("'{value}' is not an email address")))
                }
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| format!("Unknown setting: {s}"))
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_rate(key: SettingKey, value: &str) -> Result<f64> {
    let parsed: f64 = value.trim().parse().map_err(|_| {
        PulseError::invalid_input(key.as_str()).with_reason(format!("'{value}' is not a number"))
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(PulseError::invalid_input(key.as_str())
            .with_reason("Must be a non-negative number"));
    }
    Ok(parsed)
}

/// Everything the application persists, assembled from key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub notifications: NotificationSettings,
    pub rates: CostRates,
}

impl Settings {
    /// Build settings from stored pairs. Unknown keys are ignored so older
    /// databases keep loading.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Settings::default();
        let mut manager_name = None;
        let mut manager_email = None;

        for (raw_key, value) in pairs {
            let Ok(key) = raw_key.as_ref().parse::<SettingKey>() else {
                log::warn!("Ignoring unknown setting '{}'", raw_key.as_ref());
                continue;
            };
            let value: String = value.into();
            match key {
                SettingKey::ChatWebhookUrl => settings.notifications.chat_webhook_url = Some(value),
                SettingKey::EmailApiKey => settings.notifications.email_api_key = Some(value),
                SettingKey::FromEmail => settings.notifications.from_email = Some(value),
                SettingKey::FromName => settings.notifications.from_name = Some(value),
                SettingKey::ManagerName => manager_name = Some(value),
                SettingKey::ManagerEmail => manager_email = Some(value),
                SettingKey::HourlyRate => settings.rates.hourly_rate = parse_rate(key, &value)?,
                SettingKey::HoursPerStoryPoint => {
                    settings.rates.hours_per_story_point = parse_rate(key, &value)?
                }
            }
        }

        match (manager_email, manager_name) {
            (Some(email), name) => {
                settings.notifications.manager = Some(Contact {
                    name: name.unwrap_or_else(|| "Manager".to_string()),
                    email,
                });
            }
            (None, Some(name)) => {
                log::warn!("Ignoring manager_name '{name}': manager_email is not set");
            }
            (None, None) => {}
        }

        Ok(settings)
    }

    /// Value of a single key, formatted for display.
    pub fn value_of(&self, key: SettingKey) -> Option<String> {
        let n = &self.notifications;
        match key {
            SettingKey::ChatWebhookUrl => n.chat_webhook_url.clone(),
            SettingKey::EmailApiKey => n.email_api_key.clone(),
            SettingKey::FromEmail => n.from_email.clone(),
            SettingKey::FromName => n.from_name.clone(),
            SettingKey::ManagerName => n.manager.as_ref().map(|m| m.name.clone()),
            SettingKey::ManagerEmail => n.manager.as_ref().map(|m| m.email.clone()),
            SettingKey::HourlyRate => Some(self.rates.hourly_rate.to_string()),
            SettingKey::HoursPerStoryPoint => Some(self.rates.hours_per_story_point.to_string()),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rates: self.rates,
            ..EngineConfig::default()
        }
    }
}
