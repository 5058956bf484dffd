//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::orders::records::{
    AddressSnapshot, DeliveryDetails, OrderLineRecord, OrderRecord,
};

/// Order as recorded at checkout, plus its current status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,

    /// placed, accepted, preparing, out_for_delivery, delivered or cancelled
    pub order_status: String,

    /// pending, paid, failed or refunded
    pub payment_status: String,

    pub delivery_details: DeliveryDetailsResponse,

    /// Delivery address frozen at checkout
    pub address: AddressResponse,

    /// Lines frozen at checkout with the menu prices of that moment
    pub items: Vec<OrderLineResponse>,

    pub subtotal: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub discount: u64,

    /// Credited later; not deducted from the total
    pub cashback: u64,

    pub total_amount: u64,

    pub payment_details: PaymentDetailsResponse,

    pub offer_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            customer_id: order.customer_uuid.into_uuid(),
            restaurant_id: order.restaurant_uuid.into_uuid(),
            order_status: order.order_status.to_string(),
            payment_status: order.payment_status.to_string(),
            delivery_details: order.delivery.into(),
            address: order.address.into(),
            items: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            subtotal: order.amounts.subtotal,
            tax: order.amounts.tax,
            delivery_fee: order.amounts.delivery_fee,
            discount: order.amounts.discount,
            cashback: order.amounts.cashback,
            total_amount: order.amounts.total_amount,
            payment_details: PaymentDetailsResponse {
                razorpay_order_id: order.payment.gateway_order_id,
                razorpay_payment_id: order.payment.gateway_payment_id,
            },
            offer_id: order.offer_id,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Courier assignment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeliveryDetailsResponse {
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
    pub estimated_delivery_at: Option<String>,
}

impl From<DeliveryDetails> for DeliveryDetailsResponse {
    fn from(delivery: DeliveryDetails) -> Self {
        Self {
            agent_name: delivery.agent_name,
            agent_phone: delivery.agent_phone,
            estimated_delivery_at: delivery.estimated_delivery_at.map(|at| at.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressResponse {
    pub label: String,
    pub address_line: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<AddressSnapshot> for AddressResponse {
    fn from(address: AddressSnapshot) -> Self {
        Self {
            label: address.label,
            address_line: address.address_line,
            landmark: address.landmark,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineResponse {
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub note: Option<String>,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            menu_item_id: line.menu_item_uuid.into_uuid(),
            name: line.name,
            price: line.price,
            quantity: line.quantity,
            note: line.note,
        }
    }
}

/// Gateway identifiers of the payment. The signature is not echoed back.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentDetailsResponse {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
}
