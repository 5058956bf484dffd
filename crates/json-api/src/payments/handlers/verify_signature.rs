//! Verify Payment Signature Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::{
    addresses::records::AddressUuid,
    checkout::data::{CheckoutItem, CheckoutRequest, ClaimedTotals},
    menu::records::MenuItemUuid,
    orders::records::PaymentReference,
    owners::{RestaurantUuid, UserUuid},
};

use crate::{
    extensions::*, observability::observe_checkout_outcome, orders::OrderResponse,
    payments::errors::into_status_error, state::State,
};

/// Identifiers the gateway returned to the client after payment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentDetails {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,

    /// Lowercase hex HMAC-SHA256 of `order_id|payment_id`
    pub razorpay_signature: String,
}

/// A submitted line. Names and prices are taken from the menu, not the client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemRequest {
    pub menu_item_id: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<CheckoutItemRequest> for CheckoutItem {
    fn from(item: CheckoutItemRequest) -> Self {
        Self {
            menu_item: MenuItemUuid::from_uuid(item.menu_item_id),
            quantity: item.quantity,
            note: item.note,
        }
    }
}

/// Verify Signature Request
///
/// The money fields are the summary the customer was shown, in minor units.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifySignatureRequest {
    pub payment_details: PaymentDetails,
    pub items: Vec<CheckoutItemRequest>,
    pub address_id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub subtotal: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total_amount: u64,
    #[serde(default)]
    pub offer_id: Option<String>,
}

impl VerifySignatureRequest {
    fn into_checkout(self, at: Timestamp) -> CheckoutRequest {
        CheckoutRequest {
            customer: UserUuid::from_uuid(self.customer_id),
            restaurant: RestaurantUuid::from_uuid(self.restaurant_id),
            payment: PaymentReference {
                gateway_order_id: self.payment_details.razorpay_order_id,
                gateway_payment_id: self.payment_details.razorpay_payment_id,
                gateway_signature: self.payment_details.razorpay_signature,
            },
            items: self.items.into_iter().map(CheckoutItem::from).collect(),
            address: AddressUuid::from_uuid(self.address_id),
            claimed: ClaimedTotals {
                subtotal: self.subtotal,
                tax: self.tax,
                delivery_fee: self.delivery_fee,
                discount: self.discount,
                total_amount: self.total_amount,
            },
            offer_id: self.offer_id,
            at,
        }
    }
}

/// Verify Payment Signature Handler
///
/// Verifies the gateway signature, re-prices the items from the menu and records the order.
/// A 409 means the cart was already checked out: poll `/orders` instead of retrying.
#[endpoint(
    tags("payments"),
    summary = "Verify Payment and Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Payment signature is invalid"),
        (status_code = StatusCode::FORBIDDEN, description = "Customer is not the caller"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item or address not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Totals do not match"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.verify_signature",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        restaurant_uuid = tracing::field::Empty,
        gateway_order_id = tracing::field::Empty,
        items_count = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VerifySignatureRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("restaurant_uuid", tracing::field::display(request.restaurant_id));
    span.record(
        "gateway_order_id",
        request.payment_details.razorpay_order_id.as_str(),
    );
    span.record("items_count", request.items.len());

    if UserUuid::from_uuid(request.customer_id) != user {
        observe_checkout_outcome("forbidden");

        return Err(StatusError::forbidden().brief("Orders can only be placed for yourself"));
    }

    let order = match state
        .app
        .checkout
        .checkout(request.into_checkout(Timestamp::now()))
        .await
    {
        Ok(order) => order,
        Err(error) => {
            observe_checkout_outcome(error.outcome());

            return Err(into_status_error(error));
        }
    };

    observe_checkout_outcome("created");

    span.record("order_uuid", tracing::field::display(order.uuid));

    tracing::info!(
        order_uuid = %order.uuid,
        total_amount = order.amounts.total_amount,
        "placed order"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
