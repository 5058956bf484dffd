//! Active Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tiffin_app::domain::owners::UserUuid;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Active Cart Handler
///
/// Returns the caller's most recently updated non-empty cart, or `null`.
#[endpoint(
    tags("carts"),
    summary = "Get Active Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart or null"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.active",
    skip(user, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Option<CartResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_uuid_or_401()?;
    let user = UserUuid::from_uuid(user.into_inner());

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    if user != caller {
        return Err(StatusError::forbidden().brief("Carts are private to their owner"));
    }

    let cart = state
        .app
        .carts
        .get_active_cart(user, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.map(CartResponse::from)))
}
