//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

const GATEWAY_ORDER_ID_CONSTRAINT: &str = "orders_gateway_order_id_key";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart has already been checked out")]
    AlreadyCheckedOut,

    #[error("order not found")]
    NotFound,

    #[error("order cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("order already exists")]
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

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let violates_gateway_order_id = error
            .as_database_error()
            .and_then(DatabaseError::constraint)
            == Some(GATEWAY_ORDER_ID_CONSTRAINT);

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) if violates_gateway_order_id => {
                Self::AlreadyCheckedOut
            }
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
