//! Payments Config

use std::fmt;

use clap::Args;
use zeroize::Zeroizing;

use tiffin_app::domain::payments::RazorpayConfig;

/// Razorpay gateway settings.
#[derive(Args)]
pub struct PaymentsConfig {
    /// Razorpay API key id
    #[arg(long, env = "RAZORPAY_KEY_ID")]
    pub razorpay_key_id: String,

    /// Razorpay API key secret, also used to verify payment signatures
    #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
    pub razorpay_key_secret: String,

    /// Razorpay API base URL
    #[arg(long, env = "RAZORPAY_API_BASE", default_value = "https://api.razorpay.com")]
    pub razorpay_api_base: String,

    /// ISO currency code for gateway orders
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "INR")]
    pub payment_currency: String,
}

impl fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("razorpay_key_id", &self.razorpay_key_id)
            .field("razorpay_key_secret", &"[redacted]")
            .field("razorpay_api_base", &self.razorpay_api_base)
            .field("payment_currency", &self.payment_currency)
            .finish()
    }
}

impl PaymentsConfig {
    /// Gateway client configuration. Consumes the settings so the secret is held in one place.
    #[must_use]
    pub fn into_razorpay_config(self) -> RazorpayConfig {
        RazorpayConfig {
            api_base: self.razorpay_api_base,
            key_id: self.razorpay_key_id,
            key_secret: Zeroizing::new(self.razorpay_key_secret),
            currency: self.payment_currency,
        }
    }
}
