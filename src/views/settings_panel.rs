//! Settings panel: edit, validate and persist the backend connection.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::client::{ApiClient, API_KEY_HEADER};
use crate::config::{Configuration, DEFAULT_REGION};
use crate::error::{DashboardError, DashboardResult};
use crate::settings_store::{SettingKey, SettingsStore};
use crate::views::dashboard::{Dashboard, DashboardView};

const PROBE_BODY_EXCERPT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub debug_enabled: bool,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from(&Configuration::default())
    }
}

impl From<&Configuration> for SettingsForm {
    fn from(config: &Configuration) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            region: config.region.clone(),
            debug_enabled: config.debug_enabled,
        }
    }
}

/// Inline messages for the two validated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.endpoint.is_none() && self.api_key.is_none()
    }
}

impl SettingsForm {
    /// Trim the text fields and check them. On success the returned
    /// configuration is ready to persist.
    pub fn validate(&self) -> Result<Configuration, FieldErrors> {
        let endpoint = self.endpoint.trim();
        let api_key = self.api_key.trim();
        let mut errors = FieldErrors::default();

        if endpoint.is_empty() {
            errors.endpoint = Some("Required".to_string());
        } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            errors.endpoint = Some("Must start with http:// or https://".to_string());
        }
        if api_key.is_empty() {
            errors.api_key = Some("Required".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Configuration {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            region: self.region.clone(),
            debug_enabled: self.debug_enabled,
        })
    }

    pub fn status(&self) -> ConfigStatus {
        if !self.endpoint.is_empty() && !self.api_key.is_empty() {
            ConfigStatus::Configured
        } else {
            ConfigStatus::NotConfigured
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStatus {
    Configured,
    NotConfigured,
}

impl ConfigStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Configured => "Configured ✓",
            Self::NotConfigured => "Not Configured",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub form: SettingsForm,
    pub status: ConfigStatus,
    pub status_label: &'static str,
}

impl From<SettingsForm> for SettingsView {
    fn from(form: SettingsForm) -> Self {
        let status = form.status();
        Self {
            form,
            status,
            status_label: status.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Invalid { errors: FieldErrors },
    Saved { dashboard: Option<DashboardView> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Success { status: u16, elapsed_ms: u64 },
    Failed { status: u16, body: String },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClearOutcome {
    Skipped,
    Cleared { settings: SettingsView },
}

#[derive(Clone)]
pub struct SettingsPanel {
    client: ApiClient,
    store: Arc<dyn SettingsStore>,
    dashboard: Dashboard,
}

impl SettingsPanel {
    pub fn new(client: ApiClient, store: Arc<dyn SettingsStore>, dashboard: Dashboard) -> Self {
        Self {
            client,
            store,
            dashboard,
        }
    }

    /// Open the panel with the live configuration. Opening dismisses the
    /// "not configured" banner.
    pub fn open(&self) -> SettingsView {
        self.client.feedback().set_config_warning(false);
        SettingsView::from(SettingsForm::from(&self.client.config().snapshot()))
    }

    pub async fn save(&self, form: &SettingsForm) -> DashboardResult<SaveOutcome> {
        let feedback = self.client.feedback();
        let config = match form.validate() {
            Ok(config) => config,
            Err(errors) => {
                feedback.error("Please fix the validation errors");
                return Ok(SaveOutcome::Invalid { errors });
            }
        };

        if let Err(e) = self.persist(&config).await {
            error!("Error saving settings: {}", e);
            feedback.error(format!("Failed to save settings: {}", e));
            return Err(e);
        }

        self.client.config().replace(config);
        info!("Settings saved");
        feedback.success("Settings saved successfully!");
        feedback.set_config_warning(false);

        Ok(SaveOutcome::Saved {
            dashboard: self.dashboard.load().await.ok(),
        })
    }

    async fn persist(&self, config: &Configuration) -> DashboardResult<()> {
        let debug = if config.debug_enabled { "true" } else { "false" };
        self.store
            .set_all(&[
                (SettingKey::ApiEndpoint, config.endpoint.as_str()),
                (SettingKey::ApiKey, config.api_key.as_str()),
                (SettingKey::AwsRegion, config.region.as_str()),
                (SettingKey::DebugMode, debug),
            ])
            .await
    }

    /// Probe `GET /orders?limit=1` with the form's credentials.
    ///
    /// This talks to the transport directly so results stay inside the
    /// panel instead of going to the activity log and toasts.
    pub async fn test_connection(&self, form: &SettingsForm) -> DashboardResult<ProbeOutcome> {
        let endpoint = form.endpoint.trim();
        let api_key = form.api_key.trim();
        if endpoint.is_empty() || api_key.is_empty() {
            self.client
                .feedback()
                .error("Please enter API Endpoint and API Key first");
            return Err(DashboardError::Validation(
                "API endpoint and API key are required".to_string(),
            ));
        }

        let start = Instant::now();
        let response = self
            .client
            .http()
            .get(format!("{}/orders?limit=1", endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .send()
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let outcome = match response {
            Ok(response) if response.status().is_success() => ProbeOutcome::Success {
                status: response.status().as_u16(),
                elapsed_ms,
            },
            Ok(response) => {
                let status = response.status().as_u16();
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!("Could not read connection test response body: {}", e);
                        String::new()
                    }
                };
                ProbeOutcome::Failed {
                    status,
                    body: body.chars().take(PROBE_BODY_EXCERPT).collect(),
                }
            }
            Err(e) => {
                warn!("Connection test against {} failed: {}", endpoint, e);
                ProbeOutcome::Error {
                    message: e.to_string(),
                }
            }
        };
        Ok(outcome)
    }

    pub async fn clear_all(&self, confirmed: bool) -> DashboardResult<ClearOutcome> {
        if !confirmed {
            return Ok(ClearOutcome::Skipped);
        }

        let feedback = self.client.feedback();
        if let Err(e) = self.store.delete_all(&SettingKey::ALL).await {
            error!("Error clearing settings: {}", e);
            feedback.error(format!("Failed to clear settings: {}", e));
            return Err(e);
        }

        self.client.config().reset();
        info!("All settings cleared");
        feedback.success("All settings cleared");
        feedback.set_config_warning(true);

        Ok(ClearOutcome::Cleared {
            settings: SettingsView::from(SettingsForm::default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigHandle;
    use crate::feedback::Feedback;
    use async_trait::async_trait;

    use crate::settings_store::MemorySettingsStore;

    fn panel(store: Arc<dyn SettingsStore>) -> (SettingsPanel, ApiClient) {
        panel_with(store, Configuration::default())
    }

    fn panel_with(
        store: Arc<dyn SettingsStore>,
        config: Configuration,
    ) -> (SettingsPanel, ApiClient) {
        let client = ApiClient::new(ConfigHandle::new(config), Feedback::new());
        let panel = SettingsPanel::new(client.clone(), store, Dashboard::new(client.clone()));
        (panel, client)
    }

    /// Single-key access works; batch writes and deletes fail.
    #[derive(Default)]
    struct BatchFailingStore {
        inner: MemorySettingsStore,
    }

    #[async_trait]
    impl SettingsStore for BatchFailingStore {
        async fn get(&self, key: SettingKey) -> DashboardResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: SettingKey, value: &str) -> DashboardResult<()> {
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: SettingKey) -> DashboardResult<()> {
            self.inner.delete(key).await
        }

        async fn set_all(&self, _values: &[(SettingKey, &str)]) -> DashboardResult<()> {
            Err(DashboardError::Storage("disk full".to_string()))
        }

        async fn delete_all(&self, _keys: &[SettingKey]) -> DashboardResult<()> {
            Err(DashboardError::Storage("disk full".to_string()))
        }
    }

    fn configured() -> Configuration {
        Configuration {
            endpoint: "https://old.x.com".into(),
            api_key: "old".into(),
            region: "eu-west-1".into(),
            debug_enabled: true,
        }
    }

    fn form(endpoint: &str, api_key: &str) -> SettingsForm {
        SettingsForm {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            ..SettingsForm::default()
        }
    }

    #[test]
    fn validation_requires_scheme_and_key() {
        let errors = form("api.x.com", "").validate().unwrap_err();
        assert_eq!(
            errors.endpoint.as_deref(),
            Some("Must start with http:// or https://")
        );
        assert_eq!(errors.api_key.as_deref(), Some("Required"));

        let errors = form("   ", "abc").validate().unwrap_err();
        assert_eq!(errors.endpoint.as_deref(), Some("Required"));
        assert_eq!(errors.api_key, None);
    }

    #[test]
    fn validation_trims_fields() {
        let config = form("  https://api.x.com ", " abc ").validate().unwrap();
        assert_eq!(config.endpoint, "https://api.x.com");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.region, "us-east-1");
        assert!(!config.debug_enabled);
    }

    #[test]
    fn status_reflects_form_fields() {
        assert_eq!(form("", "abc").status(), ConfigStatus::NotConfigured);
        let view = SettingsView::from(form("http://localhost", "abc"));
        assert_eq!(view.status, ConfigStatus::Configured);
        assert_eq!(view.status_label, "Configured ✓");
    }

    #[tokio::test]
    async fn invalid_save_persists_nothing() {
        let store = Arc::new(MemorySettingsStore::new());
        let (panel, client) = panel(store.clone());

        let outcome = panel.save(&form("ftp://api.x.com", "abc")).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Invalid { .. }));
        let outcome = panel.save(&form("https://api.x.com", "")).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Invalid { ref errors } if errors.api_key.is_some()));

        for key in SettingKey::ALL {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
        assert!(!client.config().snapshot().is_configured());
    }

    #[tokio::test]
    async fn clear_all_needs_confirmation() {
        let store = Arc::new(MemorySettingsStore::new());
        store.set(SettingKey::ApiKey, "abc").await.unwrap();
        let (panel, client) = panel(store.clone());

        let outcome = panel.clear_all(false).await.unwrap();
        assert!(matches!(outcome, ClearOutcome::Skipped));
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap().as_deref(), Some("abc"));

        let outcome = panel.clear_all(true).await.unwrap();
        assert!(matches!(outcome, ClearOutcome::Cleared { .. }));
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap(), None);
        assert!(client.feedback().config_warning());
    }

    #[tokio::test]
    async fn clear_all_resets_live_configuration() {
        let store = Arc::new(MemorySettingsStore::new());
        store.set(SettingKey::ApiEndpoint, "https://old.x.com").await.unwrap();
        store.set(SettingKey::AwsRegion, "eu-west-1").await.unwrap();
        let (panel, client) = panel_with(store.clone(), configured());

        let ClearOutcome::Cleared { settings } = panel.clear_all(true).await.unwrap() else {
            panic!("confirmed clear was skipped");
        };
        assert_eq!(client.config().snapshot(), Configuration::default());
        assert_eq!(settings.form.endpoint, "");
        assert_eq!(settings.form.api_key, "");
        assert_eq!(settings.form.region, "us-east-1");
        assert!(!settings.form.debug_enabled);
        assert_eq!(settings.status, ConfigStatus::NotConfigured);
        for key in SettingKey::ALL {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn failed_save_leaves_store_and_config_untouched() {
        let store = Arc::new(BatchFailingStore::default());
        let (panel, client) = panel(store.clone());

        let err = panel.save(&form("https://api.x.com", "abc")).await.unwrap_err();
        assert!(matches!(err, DashboardError::Storage(_)));
        assert!(!client.config().snapshot().is_configured());
        for key in SettingKey::ALL {
            assert_eq!(store.get(key).await.unwrap(), None);
        }

        let restarted = Configuration::load(store.as_ref()).await;
        assert!(!restarted.is_configured());
        let toasts = client.feedback().snapshot().toasts;
        assert!(toasts[0].message.starts_with("Failed to save settings"));
    }

    #[tokio::test]
    async fn failed_clear_keeps_store_and_config() {
        let store = Arc::new(BatchFailingStore::default());
        store.set(SettingKey::ApiEndpoint, "https://old.x.com").await.unwrap();
        store.set(SettingKey::ApiKey, "old").await.unwrap();
        let (panel, client) = panel_with(store.clone(), configured());

        let err = panel.clear_all(true).await.unwrap_err();
        assert!(matches!(err, DashboardError::Storage(_)));
        assert_eq!(client.config().snapshot(), configured());
        assert_eq!(store.get(SettingKey::ApiKey).await.unwrap().as_deref(), Some("old"));
        assert!(!client.feedback().config_warning());
    }

    #[tokio::test]
    async fn probe_requires_fields_in_form() {
        let store = Arc::new(MemorySettingsStore::new());
        let (panel, client) = panel(store);

        let err = panel.test_connection(&form("https://api.x.com", "")).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(client.feedback().snapshot().toasts.len(), 1);
    }
}
