//! Settings store operations for the Monitor.

use log::info;
use tokio::task;

use super::Monitor;
use crate::{
    config::{SettingKey, Settings},
    db::{Database, SettingEntry},
    display::SettingsView,
    error::{PulseError, Result},
    params::{SetSetting, UnsetSetting},
};

impl Monitor {
    /// Runs `op` against a freshly opened database on a blocking thread.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            op(&db)
        })
        .await
        .map_err(|e| PulseError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Raw stored entries, unknown keys included.
    pub async fn setting_entries(&self) -> Result<Vec<SettingEntry>> {
        self.with_database(|db| db.list_settings()).await
    }

    /// Typed settings assembled from the store.
    pub async fn settings(&self) -> Result<Settings> {
        let entries = self.setting_entries().await?;
        Settings::from_pairs(entries.into_iter().map(|e| (e.key, e.value)))
    }

    /// Every recognized key with its stored value, ready for display.
    pub async fn settings_view(&self) -> Result<SettingsView> {
        let entries = self.setting_entries().await?;
        Ok(SettingsView::from_entries(&entries))
    }

    /// Validates and stores a setting.
    ///
    /// # Errors
    ///
    /// Returns `PulseError::InvalidInput` for unknown keys or values the key
    /// does not accept.
    pub async fn set_setting(&self, params: &SetSetting) -> Result<SettingEntry> {
        let key = parse_key(&params.key)?;
        let value = params.value.trim().to_string();
        key.validate(&value)?;

        let entry = self
            .with_database(move |db| db.set_setting(key, &value))
            .await?;
        info!("Stored setting {key}");
        Ok(entry)
    }

    /// Removes a setting. Returns false when it was not set.
    pub async fn unset_setting(&self, params: &UnsetSetting) -> Result<bool> {
        let key = parse_key(&params.key)?;
        let removed = self.with_database(move |db| db.unset_setting(key)).await?;
        if removed {
            info!("Removed setting {key}");
        }
        Ok(removed)
    }
}

fn parse_key(raw: &str) -> Result<SettingKey> {
    raw.parse::<SettingKey>()
        .map_err(|reason| PulseError::invalid_input("key").with_reason(reason))
}
