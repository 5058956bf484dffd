//! Reorders: rebuild a cart from a past order.

pub mod errors;
pub mod service;

pub use errors::ReorderError;
pub use service::*;
