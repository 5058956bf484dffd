//! Upsert Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::{
    carts::data::CartItemUpsert,
    menu::records::MenuItemUuid,
    owners::{RestaurantUuid, UserUuid},
};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Upsert Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpsertCartItemRequest {
    /// Replaces the line's quantity; must be at least 1
    pub quantity: u32,

    /// Replaces the line's note; at most 200 characters
    #[serde(default)]
    pub note: Option<String>,

    /// Discard carts for other restaurants instead of failing with 409
    #[serde(default)]
    pub clear_old_cart: bool,

    /// Include the premium summary in the returned cart
    #[serde(default)]
    pub apply_premium: bool,
}

impl UpsertCartItemRequest {
    fn into_upsert(
        self,
        user: UserUuid,
        restaurant: RestaurantUuid,
        menu_item: MenuItemUuid,
    ) -> CartItemUpsert {
        CartItemUpsert {
            user,
            restaurant,
            menu_item,
            quantity: self.quantity,
            note: self.note,
            clear_other_carts: self.clear_old_cart,
            apply_premium: self.apply_premium,
        }
    }
}

/// Upsert Cart Item Handler
///
/// Adds a menu item to the caller's cart for a restaurant, or replaces its quantity and note.
#[endpoint(
    tags("carts"),
    summary = "Add or Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::CONFLICT, description = "Items exist from another restaurant"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.upsert_item",
    skip(restaurant, menu_item, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        restaurant_uuid = tracing::field::Empty,
        menu_item_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    menu_item: PathParam<Uuid>,
    json: JsonBody<UpsertCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let restaurant = RestaurantUuid::from_uuid(restaurant.into_inner());
    let menu_item = MenuItemUuid::from_uuid(menu_item.into_inner());
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("restaurant_uuid", tracing::field::display(restaurant));
    span.record("menu_item_uuid", tracing::field::display(menu_item));
    span.record("quantity", request.quantity);

    let cart = state
        .app
        .carts
        .upsert_item(
            request.into_upsert(user, restaurant, menu_item),
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, lines = cart.lines.len(), "upserted cart item");

    Ok(Json(cart.into()))
}
