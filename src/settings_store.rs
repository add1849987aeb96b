//! Durable key-value storage for the dashboard's connection settings.
//!
//! The production store is a single Postgres table; the in-memory store
//! backs tests and the fallback used when the database cannot be reached.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::DashboardResult;

const UPSERT_SETTING: &str = r#"
    INSERT INTO dashboard_settings (setting_key, setting_value, updated_at)
    VALUES ($1, $2, NOW())
    ON CONFLICT (setting_key)
    DO UPDATE SET setting_value = EXCLUDED.setting_value, updated_at = NOW()
"#;

/// The four persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ApiEndpoint,
    ApiKey,
    AwsRegion,
    DebugMode,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ApiEndpoint,
        SettingKey::ApiKey,
        SettingKey::AwsRegion,
        SettingKey::DebugMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiEndpoint => "api_endpoint",
            Self::ApiKey => "api_key",
            Self::AwsRegion => "aws_region",
            Self::DebugMode => "debug_mode",
        }
    }
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: SettingKey) -> DashboardResult<Option<String>>;
    async fn set(&self, key: SettingKey, value: &str) -> DashboardResult<()>;
    async fn delete(&self, key: SettingKey) -> DashboardResult<()>;

    /// Write every pair, or none of them.
    async fn set_all(&self, values: &[(SettingKey, &str)]) -> DashboardResult<()>;

    /// Delete every key, or none of them.
    async fn delete_all(&self, keys: &[SettingKey]) -> DashboardResult<()>;
}

/// Settings persisted in the `dashboard_settings` table.
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, key: SettingKey) -> DashboardResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT setting_value FROM dashboard_settings WHERE setting_key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set(&self, key: SettingKey, value: &str) -> DashboardResult<()> {
        sqlx::query(UPSERT_SETTING)
            .bind(key.as_str())
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: SettingKey) -> DashboardResult<()> {
        sqlx::query("DELETE FROM dashboard_settings WHERE setting_key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_all(&self, values: &[(SettingKey, &str)]) -> DashboardResult<()> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in values {
            sqlx::query(UPSERT_SETTING)
                .bind(key.as_str())
                .bind(*value)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_all(&self, keys: &[SettingKey]) -> DashboardResult<()> {
        let mut tx = self.pool.begin().await?;
        for key in keys {
            sqlx::query("DELETE FROM dashboard_settings WHERE setting_key = $1")
                .bind(key.as_str())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<SettingKey, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: SettingKey) -> DashboardResult<Option<String>> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set(&self, key: SettingKey, value: &str) -> DashboardResult<()> {
        self.values.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: SettingKey) -> DashboardResult<()> {
        self.values.write().await.remove(&key);
        Ok(())
    }

    async fn set_all(&self, values: &[(SettingKey, &str)]) -> DashboardResult<()> {
        let mut map = self.values.write().await;
        for (key, value) in values {
            map.insert(*key, value.to_string());
        }
        Ok(())
    }

    async fn delete_all(&self, keys: &[SettingKey]) -> DashboardResult<()> {
        let mut map = self.values.write().await;
        for key in keys {
            map.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_set_get_delete() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap(), None);

        store.set(SettingKey::ApiKey, "abc").await.unwrap();
        assert_eq!(
            store.get(SettingKey::ApiKey).await.unwrap().as_deref(),
            Some("abc")
        );

        store.set(SettingKey::ApiKey, "def").await.unwrap();
        assert_eq!(
            store.get(SettingKey::ApiKey).await.unwrap().as_deref(),
            Some("def")
        );

        store.delete(SettingKey::ApiKey).await.unwrap();
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_batch_writes_and_deletes() {
        let store = MemorySettingsStore::new();
        store
            .set_all(&[
                (SettingKey::ApiEndpoint, "https://api.x.com"),
                (SettingKey::ApiKey, "abc"),
            ])
            .await
            .unwrap();
        assert_eq!(
            store.get(SettingKey::ApiEndpoint).await.unwrap().as_deref(),
            Some("https://api.x.com")
        );
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap().as_deref(), Some("abc"));

        store.delete_all(&SettingKey::ALL).await.unwrap();
        for key in SettingKey::ALL {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
    }

    #[test]
    fn setting_keys_are_distinct() {
        let mut names: Vec<_> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
