//! Order pricing: line totals and the flat insurance discount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fraction of the order total waived for insured customers.
pub const INSURANCE_DISCOUNT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// The three monetary fields stored on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
  pub total_amount:       Decimal,
  pub insurance_discount: Decimal,
  pub final_amount:       Decimal,
}

/// Price an order from `(unit_price, quantity)` pairs.
///
/// The discount is rounded to whole cents; `final_amount` is always exactly
/// `total_amount - insurance_discount`.
pub fn price_order<I>(has_insurance: bool, lines: I) -> Pricing
where
  I: IntoIterator<Item = (Decimal, u32)>,
{
  let total_amount: Decimal = lines
    .into_iter()
    .map(|(unit_price, quantity)| unit_price * Decimal::from(quantity))
    .sum();

  let insurance_discount = if has_insurance {
    (total_amount * INSURANCE_DISCOUNT_RATE)
      .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
  } else {
    Decimal::ZERO
  };

  Pricing {
    total_amount,
    insurance_discount,
    final_amount: total_amount - insurance_discount,
  }
}
