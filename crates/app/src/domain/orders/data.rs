//! Order Data

use crate::domain::{
    menu::records::MenuItemUuid,
    orders::records::{
        AddressSnapshot, DeliveryDetails, OrderAmounts, OrderStatus, OrderUuid, PaymentReference,
        PaymentStatus,
    },
    owners::{RestaurantUuid, UserUuid},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: UserUuid,
    pub restaurant: RestaurantUuid,
    pub lines: Vec<NewOrderLine>,
    pub address: AddressSnapshot,
    pub amounts: OrderAmounts,
    pub payment: PaymentReference,
    pub offer_id: Option<String>,
}

/// New Order Line Data, priced from the menu at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub note: Option<String>,
}

/// Changes to the mutable part of an order. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery: Option<DeliveryDetails>,
}
