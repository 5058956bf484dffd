//! Menu items: the authoritative source of names, prices and availability.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::MenuServiceError;
pub use service::*;
