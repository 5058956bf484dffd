//! Payments: gateway order creation and checkout on payment confirmation.

mod errors;
mod handlers;

pub(crate) use handlers::*;
