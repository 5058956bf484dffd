//! Payment gateway integration: order creation and signature verification.

pub mod gateway;
pub mod signature;

pub use gateway::{
    GatewayError, GatewayOrder, MockPaymentGateway, PaymentGateway, RazorpayClient, RazorpayConfig,
};
pub use signature::{SignatureError, SignatureVerifier};
