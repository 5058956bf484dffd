//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        addresses::records::AddressRecord,
        menu::records::MenuItemUuid,
        owners::{RestaurantUuid, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Placed,
    Accepted,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Placed => 0,
            Self::Accepted => 1,
            Self::Preparing => 2,
            Self::OutForDelivery => 3,
            Self::Delivered | Self::Cancelled => 4,
        }
    }

    /// Orders only move forward. Cancelling is possible until the order leaves the kitchen.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        if self as u8 == next as u8 {
            return true;
        }

        if self.is_terminal() {
            return false;
        }

        match next {
            Self::Cancelled => self.rank() < Self::OutForDelivery.rank(),
            _ => next.rank() > self.rank(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "placed" => Ok(Self::Placed),
            "accepted" => Ok(Self::Accepted),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, _)
                | (Self::Paid, Self::Paid | Self::Refunded)
                | (Self::Failed, Self::Failed | Self::Paid)
                | (Self::Refunded, Self::Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// Courier assignment, the only descriptive part of an order that may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
    pub estimated_delivery_at: Option<Timestamp>,
}

/// Delivery address as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSnapshot {
    pub label: String,
    pub address_line: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<&AddressRecord> for AddressSnapshot {
    fn from(address: &AddressRecord) -> Self {
        Self {
            label: address.label.clone(),
            address_line: address.address_line.clone(),
            landmark: address.landmark.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            pincode: address.pincode.clone(),
        }
    }
}

/// Money breakdown of an order, in minor units.
///
/// `cashback` is credited to the customer later and is not deducted from `total_amount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderAmounts {
    pub subtotal: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub cashback: u64,
    pub total_amount: u64,
}

/// Identifiers of the gateway payment that paid for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReference {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

/// Order Line Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub note: Option<String>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery: DeliveryDetails,
    pub address: AddressSnapshot,
    pub amounts: OrderAmounts,
    pub payment: PaymentReference,
    pub offer_id: Option<String>,
    pub lines: Vec<OrderLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
