//! HTTP client for the order-management backend.
//!
//! Every call goes through [`ApiClient::request_as`], which enforces the
//! configured precondition, times the round trip and reports the outcome to
//! the activity log and toasts before handing the result back.

use std::time::Instant;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::{ConfigHandle, Configuration};
use crate::error::{DashboardError, DashboardResult};
use crate::feedback::{Feedback, Severity};
use crate::models::{
    CreateOrderRequest, CreateOrderResponse, Order, OrderList, UpdateStatusRequest, WorkflowStatus,
};

pub const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ConfigHandle,
    feedback: Feedback,
}

impl ApiClient {
    pub fn new(config: ConfigHandle, feedback: Feedback) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            feedback,
        }
    }

    /// Underlying transport, for callers that must bypass the reporting.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> DashboardResult<Value> {
        self.request_as(path, method, body).await
    }

    /// Issue a request against the configured endpoint and decode the body.
    ///
    /// The configuration is snapshotted once, so a settings save that lands
    /// mid-request does not affect it.
    pub async fn request_as<T, B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> DashboardResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let config = self.config.snapshot();
        if !config.is_configured() {
            self.feedback.error("API not configured. Please go to Settings.");
            return Err(DashboardError::NotConfigured);
        }

        match self.execute(&config, path, &method, body).await {
            Ok((data, elapsed_ms)) => {
                self.feedback.log(
                    format!("API {} {} - Success ({}ms)", method, path, elapsed_ms),
                    Severity::Info,
                );
                Ok(data)
            }
            Err(e) => {
                error!("API Error: {} {} - {}", method, path, e);
                self.feedback
                    .log(format!("API {} {} - Failed: {}", method, path, e), Severity::Error);
                self.feedback.error(format!("API Error: {}", e));
                Err(e)
            }
        }
    }

    async fn execute<T, B>(
        &self,
        config: &Configuration,
        path: &str,
        method: &Method,
        body: Option<&B>,
    ) -> DashboardResult<(T, u64)>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", config.endpoint, path);
        let start = Instant::now();

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &config.api_key);
        if let Some(body) = body {
            let payload =
                serde_json::to_vec(body).map_err(|e| DashboardError::Parse(e.to_string()))?;
            if config.debug_enabled {
                info!(
                    "API Call: {} {} body={}",
                    method,
                    url,
                    String::from_utf8_lossy(&payload)
                );
            }
            builder = builder.body(payload);
        } else if config.debug_enabled {
            info!("API Call: {} {}", method, url);
        }

        let response = builder.send().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.feedback.record_response_time(elapsed_ms);

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
            return Err(DashboardError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if config.debug_enabled {
            info!("API Response: {}", String::from_utf8_lossy(&bytes));
        }

        let data = serde_json::from_slice(&bytes).map_err(|e| DashboardError::Parse(e.to_string()))?;
        Ok((data, elapsed_ms))
    }

    // ========================================================================
    // Backend operations
    // ========================================================================

    pub async fn recent_orders(&self, limit: u32) -> DashboardResult<OrderList> {
        self.request_as::<_, Value>(&format!("/orders?limit={}", limit), Method::GET, None)
            .await
    }

    pub async fn orders_page(&self, page: u32, limit: u32) -> DashboardResult<OrderList> {
        self.request_as::<_, Value>(
            &format!("/orders?page={}&limit={}", page, limit),
            Method::GET,
            None,
        )
        .await
    }

    pub async fn get_order(&self, id: &str) -> DashboardResult<Order> {
        self.request_as::<_, Value>(&format!("/orders/{}", id), Method::GET, None)
            .await
    }

    pub async fn update_order_status(&self, id: &str, status: &str) -> DashboardResult<Value> {
        self.request_as(
            &format!("/orders/{}", id),
            Method::PUT,
            Some(&UpdateStatusRequest { status }),
        )
        .await
    }

    pub async fn delete_order(&self, id: &str) -> DashboardResult<Value> {
        self.request_as::<_, Value>(&format!("/orders/{}", id), Method::DELETE, None)
            .await
    }

    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> DashboardResult<CreateOrderResponse> {
        self.request_as("/orders", Method::POST, Some(request)).await
    }

    pub async fn workflow_status(&self, id: &str) -> DashboardResult<WorkflowStatus> {
        self.request_as::<_, Value>(&format!("/status/{}", id), Method::GET, None)
            .await
    }
}
