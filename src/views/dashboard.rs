//! Dashboard summary: order counts, revenue and the most recent orders.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::DashboardResult;
use crate::models::{OrderList, OrderStatus};
use crate::views::{format_money, OrderRow};

pub const DASHBOARD_FETCH_LIMIT: u32 = 100;
pub const RECENT_ORDER_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_revenue_display: String,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub recent_orders: Vec<OrderRow>,
}

impl DashboardView {
    /// Derive the stats from one page of orders. A backend-reported total
    /// wins over the page length.
    pub fn from_orders(list: &OrderList) -> Self {
        let orders = &list.orders;
        let total_orders = list
            .pagination
            .as_ref()
            .and_then(|p| p.total)
            .filter(|total| *total > 0)
            .unwrap_or(orders.len() as u64);
        let total_revenue: f64 = orders.iter().map(|o| o.total_amount).sum();
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        Self {
            total_orders,
            total_revenue,
            total_revenue_display: format_money(total_revenue),
            pending_orders: count(OrderStatus::Pending),
            completed_orders: count(OrderStatus::Completed),
            recent_orders: orders
                .iter()
                .take(RECENT_ORDER_COUNT)
                .map(OrderRow::from)
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct Dashboard {
    client: ApiClient,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> DashboardResult<DashboardView> {
        let list = self.client.recent_orders(DASHBOARD_FETCH_LIMIT).await?;
        Ok(DashboardView::from_orders(&list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(value: serde_json::Value) -> OrderList {
        serde_json::from_value(value).unwrap()
    }

    fn order(id: &str, status: &str, amount: f64) -> serde_json::Value {
        json!({
            "order_id": id,
            "status": status,
            "total_amount": amount,
            "customer_name": "Jane Smith",
            "email": "jane@example.com",
            "order_date": "2025-03-01T10:15:30"
        })
    }

    #[test]
    fn stats_sum_revenue_and_count_statuses() {
        let view = DashboardView::from_orders(&list(json!({
            "orders": [
                order("a", "pending", 10.25),
                order("b", "completed", 20.50),
                order("c", "completed", 1.10),
                order("d", "cancelled", 5.00),
            ]
        })));

        assert_eq!(view.total_orders, 4);
        assert!((view.total_revenue - 36.85).abs() < 1e-9);
        assert_eq!(view.total_revenue_display, "$36.85");
        assert_eq!(view.pending_orders, 1);
        assert_eq!(view.completed_orders, 2);
    }

    #[test]
    fn backend_total_wins_over_page_length() {
        let view = DashboardView::from_orders(&list(json!({
            "orders": [order("a", "pending", 1.0)],
            "pagination": { "page": 1, "limit": 100, "total": 250, "total_pages": 3 }
        })));
        assert_eq!(view.total_orders, 250);
    }

    #[test]
    fn recent_orders_are_first_five_in_backend_order() {
        let orders: Vec<_> = (0..7)
            .map(|i| order(&format!("order-{i:04}"), "processing", 1.0))
            .collect();
        let view = DashboardView::from_orders(&list(json!({ "orders": orders })));

        assert_eq!(view.recent_orders.len(), RECENT_ORDER_COUNT);
        assert_eq!(view.recent_orders[0].id, "order-0000");
        assert_eq!(view.recent_orders[4].id, "order-0004");
    }

    #[test]
    fn empty_list_renders_zeroes() {
        let view = DashboardView::from_orders(&OrderList::default());
        assert_eq!(view.total_orders, 0);
        assert_eq!(view.total_revenue_display, "$0.00");
        assert!(view.recent_orders.is_empty());
    }
}
