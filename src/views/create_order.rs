//! Create-order form: customer selection, line items and running total.
//!
//! The form is edited entirely client-side; only submission reaches the
//! backend.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::client::ApiClient;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{CreateOrderItem, CreateOrderRequest, Customer, Product, ReferenceData};
use crate::views::format_money;
use crate::views::orders::{OrdersList, OrdersPageView};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please select a customer")]
    MissingCustomer,
    #[error("Please add at least one item")]
    NoItems,
    #[error("no line item at position {0}")]
    NoSuchRow(usize),
    #[error("the first line item cannot be removed")]
    FixedRow,
}

impl From<FormError> for DashboardError {
    fn from(err: FormError) -> Self {
        DashboardError::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRow {
    pub product_id: Option<String>,
    pub quantity: i64,
}

impl Default for LineItemRow {
    fn default() -> Self {
        Self {
            product_id: None,
            quantity: 1,
        }
    }
}

impl LineItemRow {
    /// The product and quantity when the row counts toward the order.
    fn priced<'a>(&self, reference: &'a ReferenceData) -> Option<(&'a Product, i64)> {
        let product = reference.product(self.product_id.as_deref()?)?;
        (self.quantity > 0).then_some((product, self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderForm {
    customer_id: Option<String>,
    rows: Vec<LineItemRow>,
}

impl Default for CreateOrderForm {
    fn default() -> Self {
        Self {
            customer_id: None,
            rows: vec![LineItemRow::default()],
        }
    }
}

impl CreateOrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    pub fn select_customer(&mut self, customer_id: Option<String>) {
        self.customer_id = customer_id.filter(|id| !id.is_empty());
    }

    pub fn add_row(&mut self) -> usize {
        self.rows.push(LineItemRow::default());
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.rows.len() {
            return Err(FormError::NoSuchRow(index));
        }
        if index == 0 {
            return Err(FormError::FixedRow);
        }
        self.rows.remove(index);
        Ok(())
    }

    pub fn update_row(
        &mut self,
        index: usize,
        product_id: Option<String>,
        quantity: i64,
    ) -> Result<(), FormError> {
        let row = self.rows.get_mut(index).ok_or(FormError::NoSuchRow(index))?;
        row.product_id = product_id.filter(|id| !id.is_empty());
        row.quantity = quantity;
        Ok(())
    }

    /// Sum of quantity x price over rows with a product and a positive
    /// quantity.
    pub fn total(&self, reference: &ReferenceData) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.priced(reference))
            .map(|(product, quantity)| quantity as f64 * product.price)
            .sum()
    }

    pub fn to_request(&self, reference: &ReferenceData) -> Result<CreateOrderRequest, FormError> {
        let customer = self
            .customer_id
            .as_deref()
            .and_then(|id| reference.customer(id))
            .ok_or(FormError::MissingCustomer)?;
        let customer_id = customer.id.clone();
        let items: Vec<CreateOrderItem> = self
            .rows
            .iter()
            .filter_map(|row| row.priced(reference))
            .map(|(product, quantity)| CreateOrderItem {
                product_id: product.id.clone(),
                quantity,
                price: product.price,
            })
            .collect();
        if items.is_empty() {
            return Err(FormError::NoItems);
        }
        Ok(CreateOrderRequest { customer_id, items })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self, reference: &ReferenceData) -> CreateOrderView {
        CreateOrderView {
            customer_id: self.customer_id.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| RowView {
                    index,
                    product_id: row.product_id.clone(),
                    quantity: row.quantity,
                    price: row
                        .product_id
                        .as_deref()
                        .and_then(|id| reference.product(id))
                        .map(|p| format_money(p.price)),
                    removable: index > 0,
                })
                .collect(),
            total: format!("{:.2}", self.total(reference)),
            customers: reference.customers.clone(),
            products: reference.products.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub index: usize,
    pub product_id: Option<String>,
    pub quantity: i64,
    pub price: Option<String>,
    pub removable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderView {
    pub customer_id: Option<String>,
    pub rows: Vec<RowView>,
    pub total: String,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub order_id: Option<String>,
    pub form: CreateOrderView,
    /// The orders list the view switches to after a successful submit.
    pub orders: Option<OrdersPageView>,
}

#[derive(Clone)]
pub struct CreateOrder {
    client: ApiClient,
    reference: Arc<ReferenceData>,
    form: Arc<Mutex<CreateOrderForm>>,
}

impl CreateOrder {
    pub fn new(client: ApiClient, reference: Arc<ReferenceData>) -> Self {
        Self {
            client,
            reference,
            form: Arc::new(Mutex::new(CreateOrderForm::new())),
        }
    }

    pub async fn view(&self) -> CreateOrderView {
        self.form.lock().await.view(&self.reference)
    }

    pub async fn select_customer(&self, customer_id: Option<String>) -> CreateOrderView {
        let mut form = self.form.lock().await;
        form.select_customer(customer_id);
        form.view(&self.reference)
    }

    pub async fn add_row(&self) -> CreateOrderView {
        let mut form = self.form.lock().await;
        form.add_row();
        form.view(&self.reference)
    }

    pub async fn remove_row(&self, index: usize) -> DashboardResult<CreateOrderView> {
        let mut form = self.form.lock().await;
        form.remove_row(index)?;
        Ok(form.view(&self.reference))
    }

    pub async fn update_row(
        &self,
        index: usize,
        product_id: Option<String>,
        quantity: i64,
    ) -> DashboardResult<CreateOrderView> {
        let mut form = self.form.lock().await;
        form.update_row(index, product_id, quantity)?;
        Ok(form.view(&self.reference))
    }

    /// Validate and submit the form, then switch to the orders list.
    ///
    /// Validation failures raise a toast and never reach the network.
    pub async fn submit(&self, orders: &OrdersList) -> DashboardResult<SubmitOutcome> {
        let request = {
            let form = self.form.lock().await;
            match form.to_request(&self.reference) {
                Ok(request) => request,
                Err(e) => {
                    self.client.feedback().error(e.to_string());
                    return Err(e.into());
                }
            }
        };

        let created = self.client.create_order(&request).await?;
        info!(
            "Order created for customer {} with {} items",
            request.customer_id,
            request.items.len()
        );
        self.client.feedback().success("Order created successfully!");

        let form = {
            let mut form = self.form.lock().await;
            form.reset();
            form.view(&self.reference)
        };

        Ok(SubmitOutcome {
            order_id: created.order_id,
            form,
            orders: orders.load().await.ok(),
        })
    }
}
