//! Remove Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tiffin_app::domain::{menu::records::MenuItemUuid, owners::RestaurantUuid};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Returns the updated cart, or `null` when removing the last line deleted it.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart or null"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove_item",
    skip(restaurant, menu_item, depot),
    fields(
        user_uuid = tracing::field::Empty,
        restaurant_uuid = tracing::field::Empty,
        menu_item_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    menu_item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Option<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let restaurant = RestaurantUuid::from_uuid(restaurant.into_inner());
    let menu_item = MenuItemUuid::from_uuid(menu_item.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("restaurant_uuid", tracing::field::display(restaurant));
    span.record("menu_item_uuid", tracing::field::display(menu_item));

    let cart = state
        .app
        .carts
        .remove_item(user, restaurant, menu_item, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_deleted = cart.is_none(), "removed cart item");

    Ok(Json(cart.map(CartResponse::from)))
}
