//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use tiffin_app::domain::checkout::CheckoutError;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyOrder => StatusError::bad_request().brief("Order has no items"),
        CheckoutError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CheckoutError::NoteTooLong => {
            StatusError::bad_request().brief("Note must be at most 200 characters")
        }
        CheckoutError::SignatureInvalid => {
            StatusError::unauthorized().brief("Payment signature is invalid")
        }
        CheckoutError::MenuItemNotFound(item) => {
            StatusError::not_found().brief(format!("Menu item {item} not found"))
        }
        CheckoutError::AddressNotFound(address) => {
            StatusError::not_found().brief(format!("Address {address} not found"))
        }
        CheckoutError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CheckoutError::TotalsMismatch => StatusError::unprocessable_entity()
            .brief("Submitted totals do not match the order"),
        CheckoutError::AlreadyCheckedOut => StatusError::conflict()
            .brief("Cart has already been checked out; see order history"),
        CheckoutError::Gateway(source) => {
            error!("payment gateway request failed: {source}");

            StatusError::bad_gateway()
        }
        other => {
            error!("checkout failed: {other}");

            StatusError::internal_server_error()
        }
    }
}
