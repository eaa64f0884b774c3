//! Demo data for a fresh database.

use clinic_core::{
  customer::{HearingLossLevel, NewCustomer},
  product::{HearingAidType, NewProduct},
  store::{ClinicStore, StoreError as _},
};
use rust_decimal::Decimal;

type CoreError = clinic_core::Error;

/// Insert the demo catalog and customer when the catalog is empty.
///
/// Returns `true` if the catalog was written. The products go in as one
/// batch, so the emptiness check sees either all of them or none. A demo
/// customer whose email is already registered is left as it is.
pub async fn seed_demo_data<S: ClinicStore>(store: &S) -> Result<bool, S::Error> {
  if !store.list_products().await?.is_empty() {
    tracing::debug!("catalog already populated; skipping demo seed");
    return Ok(false);
  }

  let products = store.add_products(demo_catalog()).await?;
  tracing::info!(count = products.len(), "seeded demo catalog");

  match store.add_customer(demo_customer()).await {
    Ok(customer) => {
      tracing::info!(customer_id = %customer.customer_id, "seeded demo customer");
    }
    Err(e) if matches!(e.domain(), Some(CoreError::DuplicateEmail(_))) => {
      tracing::debug!("demo customer already registered");
    }
    Err(e) => return Err(e),
  }
  Ok(true)
}

fn demo_customer() -> NewCustomer {
  NewCustomer {
    first_name:         "John".to_string(),
    last_name:          "Smith".to_string(),
    email:              "john@email.com".to_string(),
    phone:              Some("5550123".to_string()),
    address:            None,
    hearing_loss_level: HearingLossLevel::Moderate,
    budget:             Decimal::from(70_000),
    has_insurance:      true,
  }
}

fn demo_catalog() -> Vec<NewProduct> {
  vec![
    NewProduct {
      brand:                "Signia".to_string(),
      model:                "IX".to_string(),
      kind:                 HearingAidType::Ite,
      price:                Decimal::from(30_000),
      features:             vec!["basic_amplification".to_string()],
      suitable_loss_levels: vec![HearingLossLevel::Mild, HearingLossLevel::Moderate],
      in_stock:             10,
    },
    NewProduct {
      brand:                "Signia".to_string(),
      model:                "Styletto".to_string(),
      kind:                 HearingAidType::Bte,
      price:                Decimal::from(64_000),
      features:             vec!["bluetooth".to_string()],
      suitable_loss_levels: vec![HearingLossLevel::Moderate, HearingLossLevel::Severe],
      in_stock:             5,
    },
  ]
}
