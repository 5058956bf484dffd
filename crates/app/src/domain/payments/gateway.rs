//! Razorpay order creation.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Connection details for the Razorpay orders API.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Base URL, e.g. `"https://api.razorpay.com"`.
    pub api_base: String,

    /// Public key id, also handed to the client for the checkout widget.
    pub key_id: String,

    /// Merchant secret used for basic auth and for payment signatures.
    pub key_secret: Zeroizing<String>,

    /// ISO currency code sent with every order.
    pub currency: String,
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("api_base", &self.api_base)
            .field("key_id", &self.key_id)
            .field("key_secret", &"**redacted**")
            .field("currency", &self.currency)
            .finish()
    }
}

/// A payment order created on the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
}

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from gateway: {0}")]
    UnexpectedResponse(String),

    #[error("amount must be greater than zero")]
    InvalidAmount,
}

/// HTTP client for the Razorpay orders API.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    config: RazorpayConfig,
    http: Client,
}

impl RazorpayClient {
    #[must_use]
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount: u64, receipt: &str) -> Result<GatewayOrder, GatewayError> {
        if amount == 0 {
            return Err(GatewayError::InvalidAmount);
        }

        let url = format!("{}/v1/orders", self.config.api_base.trim_end_matches('/'));

        let body = CreateOrderRequest {
            amount,
            currency: &self.config.currency,
            receipt,
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.as_str()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "order request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a gateway order for `amount` minor units, tagged with `receipt`.
    async fn create_order(&self, amount: u64, receipt: &str) -> Result<GatewayOrder, GatewayError>;
}
