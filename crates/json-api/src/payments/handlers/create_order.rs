//! Create Payment Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::{owners::RestaurantUuid, payments::GatewayOrder};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Create Payment Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentOrderRequest {
    /// Restaurant whose cart is being paid for
    pub restaurant_id: Uuid,
}

/// Gateway order to hand to the client-side checkout widget.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentOrderResponse {
    /// Gateway order id, later echoed back as `razorpay_order_id`
    pub id: String,

    /// Amount to charge, in minor units
    pub amount: u64,

    pub currency: String,

    pub receipt: Option<String>,
}

impl From<GatewayOrder> for PaymentOrderResponse {
    fn from(order: GatewayOrder) -> Self {
        Self {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
        }
    }
}

/// Create Payment Order Handler
///
/// Creates a gateway order for the server-computed total of the caller's cart.
#[endpoint(
    tags("payments"),
    summary = "Create Payment Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gateway order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway error"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.create_order",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        restaurant_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let restaurant = RestaurantUuid::from_uuid(json.into_inner().restaurant_id);

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("restaurant_uuid", tracing::field::display(restaurant));

    let order = state
        .app
        .checkout
        .create_payment_order(user, restaurant, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::info!(gateway_order_id = %order.id, amount = order.amount, "created payment order");

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tiffin_app::domain::{
        checkout::{CheckoutError, MockCheckoutService},
        payments::GatewayError,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        authenticated_service(
            Mocks {
                checkout: Some(checkout),
                ..Mocks::default()
            },
            Router::with_path("payment/create-order").post(handler),
        )
    }

    #[tokio::test]
    async fn create_order_returns_gateway_order() -> TestResult {
        let restaurant = RestaurantUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_create_payment_order()
            .once()
            .withf(move |user, r, _| *user == TEST_USER_UUID && *r == restaurant)
            .return_once(|_, _, _| {
                Ok(GatewayOrder {
                    id: "order_1".to_string(),
                    amount: 292_00,
                    currency: "INR".to_string(),
                    receipt: Some("cart".to_string()),
                })
            });

        let mut res = TestClient::post("http://example.com/payment/create-order")
            .json(&json!({ "restaurantId": restaurant.into_uuid() }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: PaymentOrderResponse = res.take_json().await?;

        assert_eq!(body.id, "order_1");
        assert_eq!(body.amount, 292_00);

        Ok(())
    }

    #[tokio::test]
    async fn no_cart_returns_404() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_create_payment_order()
            .once()
            .return_once(|_, _, _| Err(CheckoutError::CartNotFound));

        let res = TestClient::post("http://example.com/payment/create-order")
            .json(&json!({ "restaurantId": Uuid::now_v7() }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn gateway_failure_returns_502() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_create_payment_order()
            .once()
            .return_once(|_, _, _| {
                Err(CheckoutError::Gateway(GatewayError::UnexpectedResponse(
                    "500".to_string(),
                )))
            });

        let res = TestClient::post("http://example.com/payment/create-order")
            .json(&json!({ "restaurantId": Uuid::now_v7() }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
