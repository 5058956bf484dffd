//! Payment Handlers

pub(crate) mod create_order;
pub(crate) mod verify_signature;
