//! Get Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tiffin_app::domain::owners::{RestaurantUuid, UserUuid};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart for a restaurant, or `null` when there is none. Premium savings use
/// the plan effective at the moment of the read.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart or null"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.get",
    skip(user, restaurant, depot),
    fields(
        user_uuid = tracing::field::Empty,
        restaurant_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Option<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_uuid_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());
    let restaurant = RestaurantUuid::from_uuid(restaurant.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("restaurant_uuid", tracing::field::display(restaurant));

    if user != caller {
        return Err(StatusError::forbidden().brief("Carts are private to their owner"));
    }

    let cart = state
        .app
        .carts
        .get_cart(user, restaurant, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.map(CartResponse::from)))
}
