//! Settings CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    config::SettingKey,
    error::{DatabaseResultExt, Result},
};

const SELECT_ALL_SQL: &str = "SELECT key, value, updated_at FROM settings ORDER BY key";
const SELECT_ONE_SQL: &str = "SELECT value FROM settings WHERE key = ?1";
const UPSERT_SQL: &str = "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_SQL: &str = "DELETE FROM settings WHERE key = ?1";

/// One stored setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

impl super::Database {
    /// All stored settings ordered by key, including keys this build does not
    /// recognize.
    pub fn list_settings(&self) -> Result<Vec<SettingEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_SQL)
            .db_context("Failed to prepare settings query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SettingEntry {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get::<_, String>(2)?.parse::<Timestamp>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                    })?,
                })
            })
            .db_context("Failed to query settings")?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read settings")
    }

    pub fn get_setting(&self, key: SettingKey) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_ONE_SQL, params![key.as_str()], |row| row.get(0))
            .optional()
            .db_context("Failed to read setting")
    }

    /// Insert or replace the value stored under `key`.
    pub fn set_setting(&self, key: SettingKey, value: &str) -> Result<SettingEntry> {
        let now = Timestamp::now();
        self.connection
            .execute(UPSERT_SQL, params![key.as_str(), value, now.to_string()])
            .db_context("Failed to store setting")?;

        Ok(SettingEntry {
            key: key.as_str().to_string(),
            value: value.to_string(),
            updated_at: now,
        })
    }

    /// Remove `key`. Returns false when nothing was stored.
    pub fn unset_setting(&self, key: SettingKey) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_SQL, params![key.as_str()])
            .db_context("Failed to delete setting")?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::SettingKey, db::Database};

    #[test]
    fn test_set_get_unset() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.get_setting(SettingKey::FromEmail).unwrap(), None);

        db.set_setting(SettingKey::FromEmail, "bot@example.com")
            .unwrap();
        db.set_setting(SettingKey::FromEmail, "alerts@example.com")
            .unwrap();
        assert_eq!(
            db.get_setting(SettingKey::FromEmail).unwrap().as_deref(),
            Some("alerts@example.com")
        );
        assert_eq!(db.list_settings().unwrap().len(), 1);

        assert!(db.unset_setting(SettingKey::FromEmail).unwrap());
        assert!(!db.unset_setting(SettingKey::FromEmail).unwrap());
        assert!(db.list_settings().unwrap().is_empty());
    }

    #[test]
    fn test_list_is_ordered_by_key() {
        let db = Database::in_memory().unwrap();
        db.set_setting(SettingKey::HourlyRate, "55").unwrap();
        db.set_setting(SettingKey::ChatWebhookUrl, "https://hooks.example.com/x")
            .unwrap();

        let keys: Vec<String> = db
            .list_settings()
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["chat_webhook_url", "hourly_rate"]);
    }
}
