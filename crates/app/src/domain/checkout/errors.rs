//! Checkout Errors

use thiserror::Error;

use crate::domain::{
    addresses::{AddressesServiceError, records::AddressUuid},
    carts::CartsServiceError,
    menu::{MenuServiceError, records::MenuItemUuid},
    orders::OrdersServiceError,
    payments::{GatewayError, SignatureError},
    premium::PremiumServiceError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("order has no items")]
    EmptyOrder,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("note is too long")]
    NoteTooLong,

    #[error("payment signature is invalid")]
    SignatureInvalid,

    #[error("menu item {0} not found")]
    MenuItemNotFound(MenuItemUuid),

    #[error("address {0} not found")]
    AddressNotFound(AddressUuid),

    #[error("submitted totals do not match the order")]
    TotalsMismatch,

    #[error("cart has already been checked out")]
    AlreadyCheckedOut,

    #[error("cart not found")]
    CartNotFound,

    #[error("order total cannot be represented")]
    AmountOverflow,

    #[error(transparent)]
    Signature(SignatureError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Menu(MenuServiceError),

    #[error(transparent)]
    Addresses(AddressesServiceError),

    #[error(transparent)]
    Premium(#[from] PremiumServiceError),

    #[error(transparent)]
    Carts(#[from] CartsServiceError),

    #[error(transparent)]
    Orders(OrdersServiceError),
}

impl CheckoutError {
    /// Short label for the outcome counter.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::EmptyOrder | Self::InvalidQuantity | Self::NoteTooLong => "invalid_request",
            Self::SignatureInvalid => "signature_invalid",
            Self::MenuItemNotFound(_) => "menu_item_not_found",
            Self::AddressNotFound(_) => "address_not_found",
            Self::TotalsMismatch => "totals_mismatch",
            Self::AlreadyCheckedOut => "already_checked_out",
            Self::CartNotFound => "cart_not_found",
            Self::Gateway(_) => "gateway_error",
            Self::AmountOverflow
            | Self::Signature(_)
            | Self::Menu(_)
            | Self::Addresses(_)
            | Self::Premium(_)
            | Self::Carts(_)
            | Self::Orders(_) => "internal_error",
        }
    }
}

impl From<SignatureError> for CheckoutError {
    fn from(error: SignatureError) -> Self {
        match error {
            SignatureError::Malformed | SignatureError::Mismatch => Self::SignatureInvalid,
            SignatureError::InvalidKey => Self::Signature(error),
        }
    }
}

impl From<OrdersServiceError> for CheckoutError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::AlreadyCheckedOut => Self::AlreadyCheckedOut,
            other => Self::Orders(other),
        }
    }
}
