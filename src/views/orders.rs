//! Paginated orders list with status updates and deletion.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::DashboardResult;
use crate::views::OrderRow;

pub const PAGE_SIZE: u32 = 10;

/// Pagination state owned by the orders list. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersListState {
    current_page: u32,
}

impl Default for OrdersListState {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl OrdersListState {
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Move by `delta` pages, never below page 1.
    pub fn change_page(&mut self, delta: i64) -> u32 {
        let next = (i64::from(self.current_page) + delta).clamp(1, i64::from(u32::MAX));
        self.current_page = next as u32;
        self.current_page
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersPageView {
    pub page: u32,
    pub page_size: u32,
    pub orders: Vec<OrderRow>,
    pub total_pages: Option<u64>,
}

/// Outcome of an action that needs the user's go-ahead first.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The prompt was dismissed; nothing was sent.
    Skipped,
    /// The mutation succeeded and the current page was reloaded.
    Applied { orders: Option<OrdersPageView> },
}

#[derive(Clone)]
pub struct OrdersList {
    client: ApiClient,
    state: Arc<Mutex<OrdersListState>>,
}

impl OrdersList {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(OrdersListState::default())),
        }
    }

    pub async fn current_page(&self) -> u32 {
        self.state.lock().await.current_page()
    }

    pub async fn load(&self) -> DashboardResult<OrdersPageView> {
        let page = self.current_page().await;
        let list = self.client.orders_page(page, PAGE_SIZE).await?;
        Ok(OrdersPageView {
            page,
            page_size: PAGE_SIZE,
            orders: list.orders.iter().map(OrderRow::from).collect(),
            total_pages: list.pagination.and_then(|p| p.total_pages),
        })
    }

    pub async fn change_page(&self, delta: i64) -> DashboardResult<OrdersPageView> {
        let page = self.state.lock().await.change_page(delta);
        debug!("Orders list moved to page {}", page);
        self.load().await
    }

    /// Apply a free-text status exactly as entered. An absent or empty
    /// status means the prompt was cancelled.
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: Option<&str>,
    ) -> DashboardResult<ActionOutcome> {
        let Some(status) = new_status.filter(|s| !s.is_empty()) else {
            return Ok(ActionOutcome::Skipped);
        };

        self.client.update_order_status(order_id, status).await?;
        info!("Order {} status set to {}", order_id, status);
        self.client
            .feedback()
            .success("Order status updated successfully");
        Ok(ActionOutcome::Applied {
            orders: self.load().await.ok(),
        })
    }

    pub async fn delete(&self, order_id: &str, confirmed: bool) -> DashboardResult<ActionOutcome> {
        if !confirmed {
            return Ok(ActionOutcome::Skipped);
        }

        self.client.delete_order(order_id).await?;
        info!("Order {} deleted", order_id);
        self.client.feedback().success("Order deleted successfully");
        Ok(ActionOutcome::Applied {
            orders: self.load().await.ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigHandle;
    use crate::error::DashboardError;
    use crate::feedback::Feedback;

    #[test]
    fn page_never_drops_below_one() {
        let mut state = OrdersListState::default();
        assert_eq!(state.change_page(-1), 1);
        assert_eq!(state.change_page(1), 2);
        assert_eq!(state.change_page(1), 3);
        assert_eq!(state.change_page(-5), 1);
    }

    #[tokio::test]
    async fn cancelled_prompt_sends_nothing() {
        let feedback = Feedback::new();
        let orders = OrdersList::new(ApiClient::new(ConfigHandle::default(), feedback.clone()));

        let outcome = orders.update_status("abc", Some("")).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Skipped));
        let outcome = orders.update_status("abc", None).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Skipped));

        // An unconfigured client would have raised a toast had it been called.
        assert!(feedback.snapshot().toasts.is_empty());
    }

    #[tokio::test]
    async fn whitespace_status_is_not_a_cancel() {
        let feedback = Feedback::new();
        let orders = OrdersList::new(ApiClient::new(ConfigHandle::default(), feedback.clone()));

        let err = orders.update_status("abc", Some("   ")).await.unwrap_err();
        assert!(matches!(err, DashboardError::NotConfigured));
        assert_eq!(feedback.snapshot().toasts.len(), 1);
    }

    #[tokio::test]
    async fn unconfirmed_delete_sends_nothing() {
        let feedback = Feedback::new();
        let orders = OrdersList::new(ApiClient::new(ConfigHandle::default(), feedback.clone()));

        let outcome = orders.delete("abc", false).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Skipped));
        assert!(feedback.snapshot().toasts.is_empty());
    }
}
