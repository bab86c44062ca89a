//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

use crate::items::LineItem;

/// Calculates the total price of a list of line items.
///
/// An empty list totals zero. Returns `None` if a subtotal or the running sum
/// does not fit in a [`Decimal`].
pub fn total_amount(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal()?))
}

/// Wraps a decimal amount in the given currency.
pub fn to_money(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(amount, currency)
}

/// Formats an amount as a fixed two-decimal string followed by the currency
/// code, e.g. `45.00 MDL`.
pub fn format_price(amount: Decimal, currency: &Currency) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{rounded:.2} {}", currency.iso_alpha_code)
}
