//! Reorder Errors

use thiserror::Error;

use crate::domain::{carts::CartsServiceError, menu::MenuServiceError, orders::OrdersServiceError};

#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("order not found")]
    NotFound,

    #[error("none of the ordered items can be ordered again")]
    EmptyReorder,

    #[error(transparent)]
    Menu(#[from] MenuServiceError),

    #[error(transparent)]
    Carts(#[from] CartsServiceError),

    #[error(transparent)]
    Orders(OrdersServiceError),
}

impl From<OrdersServiceError> for ReorderError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::NotFound,
            other => Self::Orders(other),
        }
    }
}
