//! Cart Data

use crate::domain::{
    carts::errors::CartsServiceError,
    menu::records::MenuItemUuid,
    owners::{RestaurantUuid, UserUuid},
};

/// Longest note a customer may attach to a line, in characters.
pub const MAX_NOTE_CHARS: usize = 200;

/// Add-or-replace request for one menu item in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemUpsert {
    pub user: UserUuid,
    pub restaurant: RestaurantUuid,
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub note: Option<String>,
    /// Discard the user's carts for other restaurants instead of failing.
    pub clear_other_carts: bool,
    /// Compute the premium summary in the returned cart.
    pub apply_premium: bool,
}

/// A line to seed a new cart with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub note: Option<String>,
}

pub(crate) fn validate_line(quantity: u32, note: Option<&str>) -> Result<(), CartsServiceError> {
    if quantity < 1 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    if note.is_some_and(|note| note.chars().count() > MAX_NOTE_CHARS) {
        return Err(CartsServiceError::NoteTooLong);
    }

    Ok(())
}
