//! Backend connection configuration.
//!
//! `Configuration` is hydrated once from the settings store and then shared
//! through a [`ConfigHandle`]. Outbound requests take a [`ConfigHandle::snapshot`]
//! when they start, so a concurrent save never changes a request mid-flight.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::error::DashboardResult;
use crate::settings_store::{SettingKey, SettingsStore};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub endpoint: String,
    pub api_key: String,
    pub region: String,
    pub debug_enabled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            region: DEFAULT_REGION.to_string(),
            debug_enabled: false,
        }
    }
}

impl Configuration {
    /// Both endpoint and key are required before any backend call.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }

    /// Read all four settings, keeping defaults for absent values.
    ///
    /// Storage failures are logged and answered with defaults.
    pub async fn load(store: &dyn SettingsStore) -> Self {
        match Self::try_load(store).await {
            Ok(config) => {
                if config.debug_enabled {
                    info!(
                        endpoint = masked(&config.endpoint),
                        api_key = masked(&config.api_key),
                        region = %config.region,
                        "Configuration loaded"
                    );
                }
                config
            }
            Err(e) => {
                warn!("No saved configuration found, using defaults: {}", e);
                Self::default()
            }
        }
    }

    async fn try_load(store: &dyn SettingsStore) -> DashboardResult<Self> {
        let mut config = Self::default();
        if let Some(endpoint) = non_empty(store.get(SettingKey::ApiEndpoint).await?) {
            config.endpoint = endpoint;
        }
        if let Some(key) = non_empty(store.get(SettingKey::ApiKey).await?) {
            config.api_key = key;
        }
        if let Some(region) = non_empty(store.get(SettingKey::AwsRegion).await?) {
            config.region = region;
        }
        if let Some(debug) = non_empty(store.get(SettingKey::DebugMode).await?) {
            config.debug_enabled = debug == "true";
        }
        Ok(config)
    }
}

fn masked(value: &str) -> &'static str {
    if value.is_empty() {
        "not set"
    } else {
        "***configured***"
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Shared, injectable handle to the live configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Configuration>>,
}

impl ConfigHandle {
    pub fn new(config: Configuration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn snapshot(&self) -> Configuration {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, config: Configuration) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    pub fn reset(&self) {
        self.replace(Configuration::default());
    }
}

/// Process settings for the dashboard service itself.
#[derive(Debug, Clone)]
pub struct ServiceEnv {
    pub bind_addr: String,
    pub database_url: String,
}

impl ServiceEnv {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("DASHBOARD_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_url: crate::db::database_url_from_env(),
        }
    }
}
