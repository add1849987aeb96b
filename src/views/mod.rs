//! View controllers for each screen area of the dashboard.
//!
//! Controllers fetch through [`crate::client::ApiClient`] and return plain
//! serializable view models; the route layer only turns them into JSON.
//!
//! - `dashboard`: summary statistics and recent orders
//! - `orders`: paginated order list with status updates and deletion
//! - `order_detail`: single order with item subtotals
//! - `create_order`: line-item form and submission
//! - `settings_panel`: connection settings, connection probe, clear-all
//! - `reports`: report generation notifications

pub mod create_order;
pub mod dashboard;
pub mod order_detail;
pub mod orders;
pub mod reports;
pub mod settings_panel;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::feedback::Feedback;
use crate::models::{Order, OrderStatus};

/// Badge colour for an order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Warning,
    Info,
    Success,
    Error,
    Ghost,
}

impl Badge {
    pub fn for_status(status: &OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Warning,
            OrderStatus::Processing => Self::Info,
            OrderStatus::Completed => Self::Success,
            OrderStatus::Cancelled | OrderStatus::Failed => Self::Error,
            OrderStatus::Other(_) => Self::Ghost,
        }
    }
}

/// One row of an orders table.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    pub id: String,
    pub short_id: String,
    pub customer_name: String,
    pub email: String,
    pub order_date: String,
    pub status: String,
    pub badge: Badge,
    pub total: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            short_id: short_id(&order.id),
            customer_name: or_na(order.customer_name.as_deref()),
            email: or_na(order.email.as_deref()),
            order_date: format_date(order.order_date),
            status: order.status.to_string(),
            badge: Badge::for_status(&order.status),
            total: format_money(order.total_amount),
        }
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub(crate) fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("{}...", prefix)
}

pub(crate) fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

pub(crate) fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub(crate) fn format_timestamp(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Result of a manual refresh of the dashboard and the orders list.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshView {
    pub dashboard: Option<dashboard::DashboardView>,
    pub orders: Option<orders::OrdersPageView>,
}

/// Reload the dashboard and the current orders page.
///
/// Each half fails independently; failures are already reported by the
/// client, so they only leave their half empty.
pub async fn refresh(
    feedback: &Feedback,
    dashboard: &dashboard::Dashboard,
    orders: &orders::OrdersList,
) -> RefreshView {
    feedback.info("Refreshing data...");
    let (dashboard, orders) = tokio::join!(dashboard.load(), orders.load());
    RefreshView {
        dashboard: dashboard.ok(),
        orders: orders.ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_badges_follow_vocabulary() {
        assert_eq!(Badge::for_status(&OrderStatus::Pending), Badge::Warning);
        assert_eq!(Badge::for_status(&OrderStatus::Processing), Badge::Info);
        assert_eq!(Badge::for_status(&OrderStatus::Completed), Badge::Success);
        assert_eq!(Badge::for_status(&OrderStatus::Cancelled), Badge::Error);
        assert_eq!(Badge::for_status(&OrderStatus::Failed), Badge::Error);
        assert_eq!(
            Badge::for_status(&OrderStatus::Other("shipped".into())),
            Badge::Ghost
        );
    }

    #[test]
    fn short_id_keeps_eight_chars() {
        assert_eq!(short_id("7f1c2a9e-0000-4000"), "7f1c2a9e...");
        assert_eq!(short_id("abc"), "abc...");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(format_money(25.5), "$25.50");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(10.005_1), "$10.01");
    }
}
