//! Hearing-aid catalog records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, customer::HearingLossLevel, error::require_text};

/// Form factor of a hearing aid.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HearingAidType {
  /// Behind the ear.
  Bte,
  /// In the ear.
  Ite,
  /// Completely in canal.
  Cic,
}

/// A catalog entry. Read-only once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub product_id:           Uuid,
  pub brand:                String,
  pub model:                String,
  #[serde(rename = "type")]
  pub kind:                 HearingAidType,
  pub price:                Decimal,
  pub features:             Vec<String>,
  pub suitable_loss_levels: Vec<HearingLossLevel>,
  pub in_stock:             u32,
  pub created_at:           DateTime<Utc>,
}

impl Product {
  pub fn display_name(&self) -> String { format!("{} {}", self.brand, self.model) }

  pub fn suits(&self, level: HearingLossLevel) -> bool {
    self.suitable_loss_levels.contains(&level)
  }
}

/// Input to [`crate::store::ClinicStore::add_product`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub brand:                String,
  pub model:                String,
  #[serde(rename = "type")]
  pub kind:                 HearingAidType,
  pub price:                Decimal,
  #[serde(default)]
  pub features:             Vec<String>,
  pub suitable_loss_levels: Vec<HearingLossLevel>,
  #[serde(default)]
  pub in_stock:             u32,
}

impl NewProduct {
  pub fn validate(&self) -> Result<()> {
    require_text("brand", &self.brand)?;
    require_text("model", &self.model)?;
    if self.price < Decimal::ZERO {
      return Err(Error::invalid("price must not be negative"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn type_uses_uppercase_tags() {
    let json = serde_json::to_string(&HearingAidType::Cic).unwrap();
    assert_eq!(json, "\"CIC\"");
    assert_eq!(HearingAidType::Bte.as_ref(), "BTE");
  }

  #[test]
  fn negative_price_is_rejected() {
    let p: NewProduct = serde_json::from_str(
      r#"{"brand":"Signia","model":"IX","type":"ITE","price":-5,
          "suitable_loss_levels":["mild"]}"#,
    )
    .unwrap();
    assert!(p.validate().unwrap_err().is_invalid());
  }
}
