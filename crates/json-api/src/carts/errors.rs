//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use tiffin_app::domain::{carts::CartsServiceError, reorders::ReorderError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::NoteTooLong => {
            StatusError::bad_request().brief("Note must be at most 200 characters")
        }
        CartsServiceError::EmptyCart
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::OtherRestaurantCart => {
            StatusError::conflict().brief("Items exist from another restaurant")
        }
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::MenuItemNotFound(item) => {
            StatusError::not_found().brief(format!("Menu item {item} not found"))
        }
        CartsServiceError::MenuItemUnavailable(item) => {
            StatusError::bad_request().brief(format!("Menu item {item} is not available"))
        }
        CartsServiceError::SubtotalOverflow => {
            error!("cart subtotal overflowed");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn reorder_into_status_error(error: ReorderError) -> StatusError {
    match error {
        ReorderError::NotFound => StatusError::not_found().brief("Order not found"),
        ReorderError::EmptyReorder => StatusError::unprocessable_entity()
            .brief("None of the items in this order can be ordered again"),
        ReorderError::Carts(source) => into_status_error(source),
        ReorderError::Menu(source) => {
            error!("menu lookup failed during reorder: {source}");

            StatusError::internal_server_error()
        }
        ReorderError::Orders(source) => {
            error!("order lookup failed during reorder: {source}");

            StatusError::internal_server_error()
        }
    }
}
