//! Customer profiles: the directory the order workflow reads from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, error::require_text, patch::nullable};

/// Clinical severity of a customer's hearing loss.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HearingLossLevel {
  Mild,
  Moderate,
  Severe,
}

/// A stored customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
  pub customer_id:        Uuid,
  pub first_name:         String,
  pub last_name:          String,
  /// Unique across the directory.
  pub email:              String,
  pub phone:              Option<String>,
  pub address:            Option<String>,
  pub hearing_loss_level: HearingLossLevel,
  pub budget:             Decimal,
  pub has_insurance:      bool,
  pub created_at:         DateTime<Utc>,
}

impl Customer {
  /// `"First Last"`, or just the first name when no last name is recorded.
  pub fn full_name(&self) -> String {
    let last = self.last_name.trim();
    if last.is_empty() {
      self.first_name.clone()
    } else {
      format!("{} {}", self.first_name, last)
    }
  }
}

/// Input to [`crate::store::ClinicStore::add_customer`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
  pub first_name:         String,
  #[serde(default)]
  pub last_name:          String,
  pub email:              String,
  pub phone:              Option<String>,
  pub address:            Option<String>,
  pub hearing_loss_level: HearingLossLevel,
  #[serde(default)]
  pub budget:             Decimal,
  #[serde(default)]
  pub has_insurance:      bool,
}

impl NewCustomer {
  pub fn validate(&self) -> Result<()> {
    require_text("first_name", &self.first_name)?;
    validate_email(&self.email)?;
    validate_budget(self.budget)
  }
}

/// A partial update; `None` leaves the stored value untouched. The optional
/// contact fields accept an explicit `null`, which clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
  pub first_name:         Option<String>,
  pub last_name:          Option<String>,
  pub email:              Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub phone:              Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub address:            Option<Option<String>>,
  pub hearing_loss_level: Option<HearingLossLevel>,
  pub budget:             Option<Decimal>,
  pub has_insurance:      Option<bool>,
}

impl CustomerPatch {
  pub fn validate(&self) -> Result<()> {
    if let Some(first) = &self.first_name {
      require_text("first_name", first)?;
    }
    if let Some(email) = &self.email {
      validate_email(email)?;
    }
    if let Some(budget) = self.budget {
      validate_budget(budget)?;
    }
    Ok(())
  }

  /// Apply the provided fields onto `customer` in place.
  pub fn apply(self, customer: &mut Customer) {
    if let Some(v) = self.first_name {
      customer.first_name = v;
    }
    if let Some(v) = self.last_name {
      customer.last_name = v;
    }
    if let Some(v) = self.email {
      customer.email = v;
    }
    if let Some(v) = self.phone {
      customer.phone = v;
    }
    if let Some(v) = self.address {
      customer.address = v;
    }
    if let Some(v) = self.hearing_loss_level {
      customer.hearing_loss_level = v;
    }
    if let Some(v) = self.budget {
      customer.budget = v;
    }
    if let Some(v) = self.has_insurance {
      customer.has_insurance = v;
    }
  }
}

fn validate_email(email: &str) -> Result<()> {
  require_text("email", email)?;
  if !email.contains('@') {
    return Err(Error::invalid(format!("email {email:?} is not an address")));
  }
  Ok(())
}

fn validate_budget(budget: Decimal) -> Result<()> {
  if budget < Decimal::ZERO {
    return Err(Error::invalid("budget must not be negative"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  fn new_customer() -> NewCustomer {
    NewCustomer {
      first_name:         "John".into(),
      last_name:          "Smith".into(),
      email:              "john@email.com".into(),
      phone:              Some("5550123".into()),
      address:            None,
      hearing_loss_level: HearingLossLevel::Moderate,
      budget:             Decimal::from(70_000),
      has_insurance:      true,
    }
  }

  #[test]
  fn loss_level_text_forms_agree() {
    assert_eq!(HearingLossLevel::Severe.as_ref(), "severe");
    assert_eq!(
      HearingLossLevel::from_str("moderate").unwrap(),
      HearingLossLevel::Moderate
    );
    let json = serde_json::to_string(&HearingLossLevel::Mild).unwrap();
    assert_eq!(json, "\"mild\"");
  }

  #[test]
  fn new_customer_validation() {
    assert!(new_customer().validate().is_ok());

    let mut c = new_customer();
    c.email = "not-an-address".into();
    assert!(c.validate().unwrap_err().is_invalid());

    let mut c = new_customer();
    c.first_name = " ".into();
    assert!(c.validate().is_err());

    let mut c = new_customer();
    c.budget = Decimal::from(-1);
    assert!(c.validate().is_err());
  }

  #[test]
  fn new_customer_defaults_from_json() {
    let c: NewCustomer = serde_json::from_str(
      r#"{"first_name":"Ann","email":"ann@x.org","hearing_loss_level":"mild"}"#,
    )
    .unwrap();
    assert_eq!(c.budget, Decimal::ZERO);
    assert!(!c.has_insurance);
    assert!(c.last_name.is_empty());
  }

  #[test]
  fn patch_touches_only_given_fields() {
    let mut customer = Customer {
      customer_id:        Uuid::new_v4(),
      first_name:         "John".into(),
      last_name:          "Smith".into(),
      email:              "john@email.com".into(),
      phone:              None,
      address:            None,
      hearing_loss_level: HearingLossLevel::Moderate,
      budget:             Decimal::from(70_000),
      has_insurance:      true,
      created_at:         Utc::now(),
    };
    let before = customer.clone();

    CustomerPatch {
      budget: Some(Decimal::from(50_000)),
      has_insurance: Some(false),
      ..Default::default()
    }
    .apply(&mut customer);

    assert_eq!(customer.budget, Decimal::from(50_000));
    assert!(!customer.has_insurance);
    assert_eq!(customer.email, before.email);
    assert_eq!(customer.full_name(), "John Smith");
  }
}
