//! Recommendation filter: catalog entries that are both clinically suitable
//! and affordable for a customer.

use crate::{customer::Customer, product::Product};

/// Retain products whose suitable levels contain the customer's level and
/// whose price is within budget. Catalog order is preserved.
pub fn recommend<'a, I>(customer: &Customer, catalog: I) -> Vec<Product>
where
  I: IntoIterator<Item = &'a Product>,
{
  catalog
    .into_iter()
    .filter(|p| p.suits(customer.hearing_loss_level) && p.price <= customer.budget)
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use rust_decimal::Decimal;
  use uuid::Uuid;

  use super::*;
  use crate::{customer::HearingLossLevel, product::HearingAidType};

  fn customer(level: HearingLossLevel, budget: i64) -> Customer {
    Customer {
      customer_id:        Uuid::new_v4(),
      first_name:         "John".into(),
      last_name:          "Smith".into(),
      email:              "john@email.com".into(),
      phone:              None,
      address:            None,
      hearing_loss_level: level,
      budget:             Decimal::from(budget),
      has_insurance:      true,
      created_at:         Utc::now(),
    }
  }

  fn product(model: &str, price: i64, levels: &[HearingLossLevel]) -> Product {
    Product {
      product_id:           Uuid::new_v4(),
      brand:                "Signia".into(),
      model:                model.into(),
      kind:                 HearingAidType::Bte,
      price:                Decimal::from(price),
      features:             vec![],
      suitable_loss_levels: levels.to_vec(),
      in_stock:             1,
      created_at:           Utc::now(),
    }
  }

  #[test]
  fn both_demo_products_match_moderate_customer() {
    use HearingLossLevel::*;
    let catalog = vec![
      product("IX", 30_000, &[Mild, Moderate]),
      product("Styletto", 64_000, &[Moderate, Severe]),
    ];
    let picks = recommend(&customer(Moderate, 70_000), &catalog);
    let models: Vec<_> = picks.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(models, ["IX", "Styletto"]);
  }

  #[test]
  fn budget_is_inclusive_and_level_must_match() {
    use HearingLossLevel::*;
    let catalog = vec![
      product("A", 500, &[Severe]),
      product("B", 501, &[Severe]),
      product("C", 100, &[Mild]),
    ];
    let picks = recommend(&customer(Severe, 500), &catalog);
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].model, "A");
  }

  #[test]
  fn no_match_is_empty_not_error() {
    let catalog = vec![product("A", 10, &[HearingLossLevel::Mild])];
    assert!(recommend(&customer(HearingLossLevel::Severe, 1_000), &catalog).is_empty());
    assert!(recommend(&customer(HearingLossLevel::Severe, 1_000), &[]).is_empty());
  }
}
