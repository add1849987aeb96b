//! Single-order detail with per-item subtotals.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::DashboardResult;
use crate::models::{Order, OrderItem, WorkflowStatus};
use crate::views::{format_money, format_timestamp, or_na, Badge};

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRow {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: String,
    pub subtotal: String,
}

impl From<&OrderItem> for OrderItemRow {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            price: format_money(item.price),
            subtotal: format_money(item.subtotal()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailView {
    pub id: String,
    pub status: String,
    pub badge: Badge,
    pub customer_name: String,
    pub email: String,
    pub order_date: String,
    pub total: String,
    pub items: Vec<OrderItemRow>,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            status: order.status.to_string(),
            badge: Badge::for_status(&order.status),
            customer_name: or_na(order.customer_name.as_deref()),
            email: or_na(order.email.as_deref()),
            order_date: format_timestamp(order.order_date),
            total: format_money(order.total_amount),
            items: order.items.iter().map(OrderItemRow::from).collect(),
        }
    }
}

#[derive(Clone)]
pub struct OrderDetail {
    client: ApiClient,
}

impl OrderDetail {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load(&self, order_id: &str) -> DashboardResult<OrderDetailView> {
        let order = self.client.get_order(order_id).await?;
        Ok(OrderDetailView::from(&order))
    }

    /// Fulfilment workflow status for the order.
    pub async fn workflow(&self, order_id: &str) -> DashboardResult<WorkflowStatus> {
        self.client.workflow_status(order_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_renders_item_subtotals() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "7f1c2a9e-1111-4000-8000-000000000000",
            "status": "completed",
            "total_amount": 1059.97,
            "customer_name": "John Doe",
            "email": "john@example.com",
            "order_date": "2025-03-01T10:15:30",
            "items": [
                { "product_id": 1, "product_name": "Laptop", "quantity": 1, "price": 999.99 },
                { "product_id": "2", "product_name": "Mouse", "quantity": 2, "price": 29.99 }
            ]
        }))
        .unwrap();

        let view = OrderDetailView::from(&order);
        assert_eq!(view.badge, Badge::Success);
        assert_eq!(view.order_date, "2025-03-01 10:15:30");
        assert_eq!(view.total, "$1059.97");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].product_id, "1");
        assert_eq!(view.items[1].price, "$29.99");
        assert_eq!(view.items[1].subtotal, "$59.98");
    }
}
