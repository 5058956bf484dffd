//! Premium benefit calculation.
//!
//! Everything here is pure: callers pass the lines, the subscriber's plan (if any) and the
//! instant the plan should be evaluated at.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::domain::{fees::standard_delivery_fee, premium::records::PremiumSubscriptionRecord};

/// A cart or order line reduced to what pricing needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub price: u64,
    pub quantity: u32,
}

/// Savings granted by an effective plan, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PremiumBenefits {
    pub free_delivery: u64,
    pub extra_discount: u64,
    pub cashback: u64,
    pub total_savings: u64,
}

/// Sum of `price × quantity` over `lines`, or `None` on overflow.
#[must_use]
pub fn subtotal_of(lines: &[PricedLine]) -> Option<u64> {
    lines.iter().try_fold(0_u64, |subtotal, line| {
        line.price
            .checked_mul(u64::from(line.quantity))
            .and_then(|amount| subtotal.checked_add(amount))
    })
}

/// `percent`% of `amount`, rounded half away from zero.
///
/// Negative percentages and unrepresentable results yield 0.
#[must_use]
pub fn percent_of(amount: u64, percent: Decimal) -> u64 {
    if percent.is_sign_negative() {
        return 0;
    }

    Decimal::from(amount)
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_u64())
        .unwrap_or(0)
}

/// Compute the savings `plan` grants on `lines` at instant `at`.
///
/// An empty set of lines earns nothing, whatever the plan.
#[must_use]
pub fn compute_benefits(
    lines: &[PricedLine],
    plan: Option<&PremiumSubscriptionRecord>,
    at: Timestamp,
) -> PremiumBenefits {
    if lines.is_empty() {
        return PremiumBenefits::default();
    }

    let Some(plan) = plan.filter(|plan| plan.is_effective_at(at)) else {
        return PremiumBenefits::default();
    };

    let Some(subtotal) = subtotal_of(lines) else {
        return PremiumBenefits::default();
    };

    let free_delivery = if plan.perks.free_delivery {
        standard_delivery_fee(subtotal)
    } else {
        0
    };

    let extra_discount = percent_of(subtotal, plan.perks.extra_discount_percent);
    let cashback = percent_of(subtotal, plan.perks.cashback_percent);

    let total_savings = free_delivery
        .checked_add(extra_discount)
        .and_then(|savings| savings.checked_add(cashback))
        .unwrap_or(0);

    PremiumBenefits {
        free_delivery,
        extra_discount,
        cashback,
        total_savings,
    }
}
