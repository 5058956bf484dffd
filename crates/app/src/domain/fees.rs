//! Delivery fee and tax rules shared by carts, premium benefits and checkout.

/// Subtotal (minor units) at or above which delivery is free for everyone.
pub const FREE_DELIVERY_THRESHOLD: u64 = 500_00;

/// Delivery fee charged below [`FREE_DELIVERY_THRESHOLD`].
pub const STANDARD_DELIVERY_FEE: u64 = 40_00;

/// Tax rate applied to the subtotal, in percent.
pub const TAX_PERCENT: u64 = 5;

/// Delivery fee a customer without premium pays for `subtotal`.
#[must_use]
pub const fn standard_delivery_fee(subtotal: u64) -> u64 {
    if subtotal >= FREE_DELIVERY_THRESHOLD {
        0
    } else {
        STANDARD_DELIVERY_FEE
    }
}

/// Tax owed on `subtotal`, rounded half up to the nearest minor unit.
#[must_use]
pub const fn tax_for(subtotal: u64) -> u64 {
    let scaled = subtotal.saturating_mul(TAX_PERCENT);

    scaled / 100 + if scaled % 100 >= 50 { 1 } else { 0 }
}
