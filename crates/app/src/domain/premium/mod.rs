//! Premium subscriptions and the savings they grant.

pub mod benefits;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use benefits::{PremiumBenefits, PricedLine, compute_benefits, subtotal_of};
pub use errors::PremiumServiceError;
pub use service::*;
