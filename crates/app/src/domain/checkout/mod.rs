//! Checkout: turn a paid gateway order into an immutable order.

pub mod data;
pub mod errors;
pub mod service;
pub mod totals;

pub use errors::CheckoutError;
pub use service::*;
