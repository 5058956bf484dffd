//! Checkout Data

use std::fmt;

use jiff::Timestamp;

use crate::domain::{
    addresses::records::AddressUuid,
    menu::records::MenuItemUuid,
    orders::records::PaymentReference,
    owners::{RestaurantUuid, UserUuid},
};

/// A line as submitted by the client. Only the item and quantity are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutItem {
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub note: Option<String>,
}

/// The money summary the client showed the customer before paying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimedTotals {
    pub subtotal: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total_amount: u64,
}

/// Payment confirmation for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: UserUuid,
    pub restaurant: RestaurantUuid,
    pub payment: PaymentReference,
    pub items: Vec<CheckoutItem>,
    pub address: AddressUuid,
    pub claimed: ClaimedTotals,
    pub offer_id: Option<String>,
    pub at: Timestamp,
}

/// How far a checkout got. Anything short of [`CheckoutStage::OrderCreated`] leaves no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Received,
    SignatureVerified,
    Repriced,
    AddressResolved,
    OrderCreated,
    CartRetired,
}

impl CheckoutStage {
    /// Every stage, in the order a successful checkout passes through them.
    pub const ALL: [Self; 6] = [
        Self::Received,
        Self::SignatureVerified,
        Self::Repriced,
        Self::AddressResolved,
        Self::OrderCreated,
        Self::CartRetired,
    ];

    /// Stages reached together when the order transaction commits.
    pub const COMMITTED: [Self; 2] = [Self::OrderCreated, Self::CartRetired];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::SignatureVerified => "signature_verified",
            Self::Repriced => "repriced",
            Self::AddressResolved => "address_resolved",
            Self::OrderCreated => "order_created",
            Self::CartRetired => "cart_retired",
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
