//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::menu::records::MenuItemUuid;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("note must be at most 200 characters")]
    NoteTooLong,

    #[error("cart not found")]
    NotFound,

    #[error("menu item {0} not found on this restaurant's menu")]
    MenuItemNotFound(MenuItemUuid),

    #[error("menu item {0} is not available")]
    MenuItemUnavailable(MenuItemUuid),

    #[error("items exist from another restaurant")]
    OtherRestaurantCart,

    #[error("a cart needs at least one line")]
    EmptyCart,

    #[error("cart subtotal is out of range")]
    SubtotalOverflow,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
