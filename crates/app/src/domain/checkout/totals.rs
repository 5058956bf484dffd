//! Server-side order totals.

use crate::domain::{
    checkout::data::ClaimedTotals,
    fees::{standard_delivery_fee, tax_for},
    orders::records::OrderAmounts,
    premium::PremiumBenefits,
};

/// Largest difference, in minor units, tolerated between a claimed and a computed component.
pub const TOTALS_TOLERANCE: u64 = 1;

/// Amounts for an order with `subtotal`, after premium `benefits`.
///
/// Returns `None` if the total cannot be represented.
#[must_use]
pub fn order_amounts(subtotal: u64, benefits: &PremiumBenefits) -> Option<OrderAmounts> {
    let tax = tax_for(subtotal);
    let delivery_fee = standard_delivery_fee(subtotal).saturating_sub(benefits.free_delivery);
    let discount = benefits.extra_discount.min(subtotal);

    let total_amount = subtotal
        .checked_add(tax)?
        .checked_add(delivery_fee)?
        .checked_sub(discount)?;

    Some(OrderAmounts {
        subtotal,
        tax,
        delivery_fee,
        discount,
        cashback: benefits.cashback,
        total_amount,
    })
}

/// Every claimed component is within [`TOTALS_TOLERANCE`] of the computed one.
#[must_use]
pub fn claims_match(claimed: &ClaimedTotals, computed: &OrderAmounts) -> bool {
    [
        (claimed.subtotal, computed.subtotal),
        (claimed.tax, computed.tax),
        (claimed.delivery_fee, computed.delivery_fee),
        (claimed.discount, computed.discount),
        (claimed.total_amount, computed.total_amount),
    ]
    .into_iter()
    .all(|(claimed, computed)| claimed.abs_diff(computed) <= TOTALS_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use crate::domain::fees::STANDARD_DELIVERY_FEE;

    use super::*;

    fn claimed(amounts: &OrderAmounts) -> ClaimedTotals {
        ClaimedTotals {
            subtotal: amounts.subtotal,
            tax: amounts.tax,
            delivery_fee: amounts.delivery_fee,
            discount: amounts.discount,
            total_amount: amounts.total_amount,
        }
    }

    #[test]
    fn no_benefits_pays_tax_and_delivery() {
        let amounts = order_amounts(400_00, &PremiumBenefits::default());

        assert_eq!(
            amounts,
            Some(OrderAmounts {
                subtotal: 400_00,
                tax: 20_00,
                delivery_fee: STANDARD_DELIVERY_FEE,
                discount: 0,
                cashback: 0,
                total_amount: 460_00,
            })
        );
    }

    #[test]
    fn premium_waives_delivery_and_discounts_but_cashback_is_not_deducted() {
        let benefits = PremiumBenefits {
            free_delivery: STANDARD_DELIVERY_FEE,
            extra_discount: 40_00,
            cashback: 10_00,
            total_savings: 90_00,
        };

        let amounts = order_amounts(400_00, &benefits);

        assert_eq!(
            amounts,
            Some(OrderAmounts {
                subtotal: 400_00,
                tax: 20_00,
                delivery_fee: 0,
                discount: 40_00,
                cashback: 10_00,
                total_amount: 380_00,
            })
        );
    }

    #[test]
    fn free_delivery_above_threshold_costs_nothing() {
        let amounts = order_amounts(600_00, &PremiumBenefits::default());

        assert_eq!(amounts.map(|a| a.delivery_fee), Some(0));
        assert_eq!(amounts.map(|a| a.total_amount), Some(630_00));
    }

    #[test]
    fn overflowing_total_is_unrepresentable() {
        assert_eq!(order_amounts(u64::MAX, &PremiumBenefits::default()), None);
    }

    #[test]
    fn claims_within_one_minor_unit_match() {
        let computed = order_amounts(400_00, &PremiumBenefits::default()).unwrap_or_default();
        let mut claim = claimed(&computed);
        claim.tax += 1;
        claim.total_amount -= 1;

        assert!(claims_match(&claim, &computed));
    }

    #[test]
    fn claims_off_by_more_than_one_minor_unit_do_not_match() {
        let computed = order_amounts(400_00, &PremiumBenefits::default()).unwrap_or_default();
        let mut claim = claimed(&computed);
        claim.discount += 2;

        assert!(!claims_match(&claim, &computed));
    }
}
