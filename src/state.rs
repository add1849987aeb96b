//! Shared application state handed to every route through an `Extension`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::{ConfigHandle, Configuration};
use crate::feedback::Feedback;
use crate::models::ReferenceData;
use crate::settings_store::SettingsStore;
use crate::views::create_order::CreateOrder;
use crate::views::dashboard::Dashboard;
use crate::views::order_detail::OrderDetail;
use crate::views::orders::OrdersList;
use crate::views::reports::Reports;
use crate::views::settings_panel::SettingsPanel;

#[derive(Clone)]
pub struct AppState {
    pub feedback: Feedback,
    pub config: ConfigHandle,
    pub dashboard: Dashboard,
    pub orders: OrdersList,
    pub order_detail: OrderDetail,
    pub create_order: CreateOrder,
    pub settings: SettingsPanel,
    pub reports: Reports,
}

impl AppState {
    pub fn new(
        config: Configuration,
        store: Arc<dyn SettingsStore>,
        reference: ReferenceData,
    ) -> Self {
        let feedback = Feedback::new();
        let config = ConfigHandle::new(config);
        let client = ApiClient::new(config.clone(), feedback.clone());
        let dashboard = Dashboard::new(client.clone());

        Self {
            orders: OrdersList::new(client.clone()),
            order_detail: OrderDetail::new(client.clone()),
            create_order: CreateOrder::new(client.clone(), Arc::new(reference)),
            settings: SettingsPanel::new(client, store, dashboard.clone()),
            reports: Reports::new(feedback.clone()),
            dashboard,
            feedback,
            config,
        }
    }

    /// Hydrate the configuration from the store and raise the "not
    /// configured" banner when the connection is incomplete.
    pub async fn bootstrap(store: Arc<dyn SettingsStore>, reference: ReferenceData) -> Self {
        let config = Configuration::load(store.as_ref()).await;
        let configured = config.is_configured();
        let state = Self::new(config, store, reference);

        if configured {
            info!("Backend connection configured");
        } else {
            warn!("Backend connection not configured; open the settings panel");
            state.feedback.set_config_warning(true);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings_store::{MemorySettingsStore, SettingKey};

    #[tokio::test]
    async fn bootstrap_flags_missing_configuration() {
        let state =
            AppState::bootstrap(Arc::new(MemorySettingsStore::new()), ReferenceData::default())
                .await;
        assert!(state.feedback.config_warning());
        assert!(!state.config.snapshot().is_configured());
    }

    #[tokio::test]
    async fn bootstrap_hydrates_saved_settings() {
        let store = Arc::new(MemorySettingsStore::new());
        store.set(SettingKey::ApiEndpoint, "https://api.x.com").await.unwrap();
        store.set(SettingKey::ApiKey, "abc").await.unwrap();

        let state = AppState::bootstrap(store, ReferenceData::default()).await;
        assert!(!state.feedback.config_warning());
        assert_eq!(state.config.snapshot().endpoint, "https://api.x.com");
    }
}
