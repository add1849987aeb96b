//! Wire models for the order-management backend and the dashboard's
//! reference data.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ids arrive as strings or integers depending on the backend table.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected id, found {other}"))),
    }
}

fn lenient_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("expected id, found {other}"))),
    }
}

// ============================================================================
// Backend Models (Deserialize from the backend's JSON)
// ============================================================================

/// Order status. Updates are free text, so unrecognized values are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Failed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order as returned by the list and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "order_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_opt_id")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub order_date: Option<NaiveDateTime>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: f64,
    /// Only populated by `GET /orders/{id}`.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(deserialize_with = "lenient_id")]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Execution status of the fulfilment workflow started for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub status: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "stopDate", default)]
    pub stop_date: Option<String>,
}

// ============================================================================
// Request Models (Serialize to the backend)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusRequest<'a> {
    pub status: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}

// ============================================================================
// Reference Data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Customers and products offered by the create-order form.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}

impl ReferenceData {
    pub fn new(customers: Vec<Customer>, products: Vec<Product>) -> Self {
        Self {
            customers,
            products,
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }
}

impl Default for ReferenceData {
    /// Placeholder catalog used until customers and products are served by
    /// the backend.
    fn default() -> Self {
        let customer = |id: &str, name: &str, email: &str| Customer {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        };
        let product = |id: &str, name: &str, price: f64| Product {
            id: id.into(),
            name: name.into(),
            price,
        };
        Self {
            customers: vec![
                customer("1", "John Doe", "john@example.com"),
                customer("2", "Jane Smith", "jane@example.com"),
                customer("3", "Bob Johnson", "bob@example.com"),
            ],
            products: vec![
                product("1", "Laptop", 999.99),
                product("2", "Mouse", 29.99),
                product("3", "Keyboard", 79.99),
                product("4", "Monitor", 299.99),
                product("5", "Headphones", 149.99),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_deserializes_backend_shape() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "7f1c2a9e-0000-4000-8000-000000000000",
            "customer_id": 1,
            "order_date": "2025-03-01T10:15:30.123456",
            "status": "pending",
            "total_amount": 59.98,
            "customer_name": "John Doe",
            "email": null
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer_id.as_deref(), Some("1"));
        assert_eq!(order.email, None);
        assert!(order.order_date.is_some());
        assert!(order.items.is_empty());
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: OrderStatus = serde_json::from_value(json!("on-hold")).unwrap();
        assert_eq!(status, OrderStatus::Other("on-hold".into()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("on-hold"));
    }

    #[test]
    fn item_subtotal_is_quantity_times_price() {
        let item = OrderItem {
            product_id: "2".into(),
            product_name: "Mouse".into(),
            quantity: 3,
            price: 29.99,
        };
        assert!((item.subtotal() - 89.97).abs() < 1e-9);
    }
}
