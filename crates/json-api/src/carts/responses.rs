//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::{
    carts::records::{CartLineRecord, CartRecord},
    premium::PremiumBenefits,
};

/// Cart snapshot, priced from the live menu when it was read.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The customer who owns the cart
    pub user_id: Uuid,

    /// The restaurant the cart orders from
    pub restaurant_id: Uuid,

    /// Lines in the order they were first added
    pub items: Vec<CartLineResponse>,

    /// Sum of price × quantity, in minor units
    pub subtotal: u64,

    /// Savings from the customer's effective premium plan
    pub premium_summary: PremiumSummaryResponse,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            user_id: cart.user_uuid.into_uuid(),
            restaurant_id: cart.restaurant_uuid.into_uuid(),
            items: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            subtotal: cart.subtotal,
            premium_summary: cart.premium_summary.into(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    /// The menu item on this line
    pub menu_item_id: Uuid,

    /// Current menu name
    pub name: String,

    /// Current menu price, in minor units
    pub price: u64,

    /// Whether the item can currently be ordered
    pub is_available: bool,

    pub quantity: u32,

    pub note: Option<String>,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            menu_item_id: line.menu_item_uuid.into_uuid(),
            name: line.name,
            price: line.price,
            is_available: line.is_available,
            quantity: line.quantity,
            note: line.note,
        }
    }
}

/// Premium Summary Response, in minor units
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PremiumSummaryResponse {
    pub free_delivery: u64,
    pub extra_discount: u64,
    pub cashback: u64,
    pub total_savings: u64,
}

impl From<PremiumBenefits> for PremiumSummaryResponse {
    fn from(benefits: PremiumBenefits) -> Self {
        Self {
            free_delivery: benefits.free_delivery,
            extra_discount: benefits.extra_discount,
            cashback: benefits.cashback,
            total_savings: benefits.total_savings,
        }
    }
}
