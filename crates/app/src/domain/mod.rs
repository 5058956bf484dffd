//! Tiffin Domain Concerns

pub mod addresses;
pub(crate) mod amounts;
pub mod carts;
pub mod checkout;
pub mod fees;
pub mod menu;
pub mod orders;
pub mod owners;
pub mod payments;
pub mod premium;
pub mod reorders;
