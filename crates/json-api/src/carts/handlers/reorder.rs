//! Reorder Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tiffin_app::domain::orders::records::OrderUuid;

use crate::{
    carts::{errors::reorder_into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Reorder Handler
///
/// Replaces the caller's carts with one holding the still-orderable lines of a past order.
#[endpoint(
    tags("carts"),
    summary = "Reorder",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created from the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Nothing in the order can be ordered again"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.reorder",
    skip(order, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = OrderUuid::from_uuid(order.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));

    let cart = state
        .app
        .reorders
        .reorder_from(user, order, Timestamp::now())
        .await
        .map_err(reorder_into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, lines = cart.lines.len(), "rebuilt cart from order");

    res.status_code(StatusCode::CREATED);

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tiffin_app::domain::{
        menu::records::MenuItemUuid,
        owners::RestaurantUuid,
        reorders::{MockReorderService, ReorderError},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_cart};

    use super::*;

    fn make_service(reorders: MockReorderService) -> Service {
        authenticated_service(
            Mocks {
                reorders: Some(reorders),
                ..Mocks::default()
            },
            Router::with_path("cart/reorder/{order}").post(handler),
        )
    }

    #[tokio::test]
    async fn reorder_returns_new_cart() -> TestResult {
        let order = OrderUuid::new();
        let restaurant = RestaurantUuid::new();
        let cart = make_cart(restaurant, MenuItemUuid::new());

        let mut reorders = MockReorderService::new();

        reorders
            .expect_reorder_from()
            .once()
            .withf(move |user, o, _| *user == TEST_USER_UUID && *o == order)
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post(format!("http://example.com/cart/reorder/{order}"))
            .send(&make_service(reorders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.restaurant_id, restaurant.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn nothing_orderable_returns_422() -> TestResult {
        let order = OrderUuid::new();

        let mut reorders = MockReorderService::new();

        reorders
            .expect_reorder_from()
            .once()
            .return_once(|_, _, _| Err(ReorderError::EmptyReorder));

        let res = TestClient::post(format!("http://example.com/cart/reorder/{order}"))
            .send(&make_service(reorders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_returns_404() -> TestResult {
        let order = OrderUuid::new();

        let mut reorders = MockReorderService::new();

        reorders
            .expect_reorder_from()
            .once()
            .return_once(|_, _, _| Err(ReorderError::NotFound));

        let res = TestClient::post(format!("http://example.com/cart/reorder/{order}"))
            .send(&make_service(reorders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
