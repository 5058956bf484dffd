//! App Router

use salvo::Router;

use crate::{auth, carts, orders, payments};

/// Routes that act on behalf of the signed-in customer.
///
/// Literal segments are registered before the `{uuid}` patterns they would otherwise match.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .push(Router::with_path("active/{user}").get(carts::active::handler))
                .push(Router::with_path("reorder/{order}").post(carts::reorder::handler))
                .push(Router::with_path("{restaurant}").delete(carts::clear::handler))
                .push(Router::with_path("{user}/{restaurant}").get(carts::get::handler))
                .push(
                    Router::with_path("{restaurant}/{menu_item}")
                        .put(carts::upsert::handler)
                        .delete(carts::remove::handler),
                ),
        )
        .push(
            Router::with_path("payment")
                .push(Router::with_path("create-order").post(payments::create_order::handler))
                .push(
                    Router::with_path("verify-signature").post(payments::verify_signature::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}
