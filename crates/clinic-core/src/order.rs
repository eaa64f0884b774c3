//! Orders, line items and the order status lifecycle.
//!
//! An order exclusively owns its line items: both are written in a single
//! store transaction and line items are never mutated afterwards. Each line
//! item carries a snapshot of the product price taken at order time.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, customer::Customer, product::Product};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Fulfilment status of an order, in its usual order of progression.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
  #[default]
  Ordered,
  Shipped,
  Delivered,
  Fitted,
}

/// How a status write relates to the status it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  Forward,
  Unchanged,
  Backward,
}

impl OrderStatus {
  /// Parse a wire value, reporting unknown values as validation failures.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s.trim()).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }

  /// Classify moving from `previous` to `self`. Writes are never refused on
  /// this basis; callers only log backwards moves.
  pub fn transition_from(self, previous: OrderStatus) -> Transition {
    match self.cmp(&previous) {
      std::cmp::Ordering::Greater => Transition::Forward,
      std::cmp::Ordering::Equal => Transition::Unchanged,
      std::cmp::Ordering::Less => Transition::Backward,
    }
  }

  pub fn is_completed(self) -> bool { self == Self::Fitted }
}

// ─── Ear side ────────────────────────────────────────────────────────────────

/// Which ear(s) a line item's device is fitted to.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EarSide {
  Left,
  Right,
  Both,
}

// ─── Stored records ──────────────────────────────────────────────────────────

/// A priced order. `final_amount == total_amount - insurance_discount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub order_id:           Uuid,
  pub customer_id:        Uuid,
  pub status:             OrderStatus,
  pub total_amount:       Decimal,
  pub insurance_discount: Decimal,
  pub final_amount:       Decimal,
  pub delivery_date:      Option<DateTime<Utc>>,
  pub tracking_number:    Option<String>,
  pub notes:              Option<String>,
  pub created_at:         DateTime<Utc>,
}

/// One product entry within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub line_item_id: Uuid,
  pub order_id:     Uuid,
  pub product_id:   Uuid,
  pub quantity:     u32,
  /// Product price at the moment the order was created.
  pub unit_price:   Decimal,
  pub ear_side:     EarSide,
}

impl LineItem {
  pub fn line_total(&self) -> Decimal { self.unit_price * Decimal::from(self.quantity) }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// A requested line item; the price is resolved by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLineItem {
  #[serde(alias = "hearing_aid_id")]
  pub product_id: Uuid,
  pub quantity:   u32,
  pub ear_side:   EarSide,
}

/// Input to [`crate::store::ClinicStore::create_order`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
  pub customer_id: Uuid,
  pub items:       Vec<NewLineItem>,
  pub notes:       Option<String>,
}

impl NewOrder {
  pub fn validate(&self) -> Result<()> {
    if self.items.is_empty() {
      return Err(Error::invalid("an order needs at least one line item"));
    }
    if let Some(item) = self.items.iter().find(|i| i.quantity == 0) {
      return Err(Error::invalid(format!(
        "quantity for product {} must be positive",
        item.product_id
      )));
    }
    Ok(())
  }
}

// ─── Hydrated read model ─────────────────────────────────────────────────────

/// A line item together with the product it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemDetails {
  #[serde(flatten)]
  pub item:    LineItem,
  pub product: Product,
}

/// An order with its owning customer and line items, assembled on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
  #[serde(flatten)]
  pub order:    Order,
  pub customer: Customer,
  pub items:    Vec<LineItemDetails>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_known_and_rejects_unknown() {
    assert_eq!(OrderStatus::parse("fitted").unwrap(), OrderStatus::Fitted);
    assert_eq!(OrderStatus::parse(" shipped ").unwrap(), OrderStatus::Shipped);
    let err = OrderStatus::parse("lost").unwrap_err();
    assert!(matches!(err, Error::UnknownStatus(ref s) if s == "lost"));
    assert!(err.is_invalid());
  }

  #[test]
  fn transitions_follow_progression() {
    use OrderStatus::*;
    assert_eq!(Shipped.transition_from(Ordered), Transition::Forward);
    assert_eq!(Fitted.transition_from(Ordered), Transition::Forward);
    assert_eq!(Delivered.transition_from(Delivered), Transition::Unchanged);
    assert_eq!(Ordered.transition_from(Fitted), Transition::Backward);
  }

  #[test]
  fn order_validation() {
    let product_id = Uuid::new_v4();
    let mut order = NewOrder {
      customer_id: Uuid::new_v4(),
      items:       vec![],
      notes:       None,
    };
    assert!(order.validate().is_err());

    order.items.push(NewLineItem { product_id, quantity: 0, ear_side: EarSide::Both });
    assert!(order.validate().unwrap_err().is_invalid());

    order.items[0].quantity = 2;
    assert!(order.validate().is_ok());
  }

  #[test]
  fn line_item_accepts_legacy_product_key() {
    let id = Uuid::new_v4();
    let item: NewLineItem = serde_json::from_value(serde_json::json!({
      "hearing_aid_id": id,
      "quantity": 1,
      "ear_side": "left",
    }))
    .unwrap();
    assert_eq!(item.product_id, id);
    assert_eq!(item.ear_side, EarSide::Left);
  }
}
