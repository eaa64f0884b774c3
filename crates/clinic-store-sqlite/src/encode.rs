//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, money is decimal text, UUIDs are
//! hyphenated lowercase strings, and list-valued fields are compact JSON.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use clinic_core::{
  appointment::Appointment,
  customer::{Customer, HearingLossLevel},
  order::{LineItem, Order},
  product::Product,
};
use rusqlite::Row;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> { Ok(Decimal::from_str(s)?) }

/// Parse a text column into one of the `strum`-backed domain enums.
pub fn decode_enum<T: FromStr>(column: &'static str, s: &str) -> Result<T> {
  T::from_str(s).map_err(|_| Error::Decode { column, value: s.to_owned() })
}

pub fn decode_count(column: &'static str, n: i64) -> Result<u32> {
  u32::try_from(n).map_err(|_| Error::Decode { column, value: n.to_string() })
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const CUSTOMER_COLUMNS: &str = "customer_id, first_name, last_name, email, phone, address,
   hearing_loss_level, budget, has_insurance, created_at";

/// Raw values read directly from a `customers` row.
pub struct RawCustomer {
  pub customer_id:        String,
  pub first_name:         String,
  pub last_name:          String,
  pub email:              String,
  pub phone:              Option<String>,
  pub address:            Option<String>,
  pub hearing_loss_level: String,
  pub budget:             String,
  pub has_insurance:      bool,
  pub created_at:         String,
}

impl RawCustomer {
  /// Read a row selected with [`CUSTOMER_COLUMNS`], starting at `offset`.
  pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      customer_id:        row.get(offset)?,
      first_name:         row.get(offset + 1)?,
      last_name:          row.get(offset + 2)?,
      email:              row.get(offset + 3)?,
      phone:              row.get(offset + 4)?,
      address:            row.get(offset + 5)?,
      hearing_loss_level: row.get(offset + 6)?,
      budget:             row.get(offset + 7)?,
      has_insurance:      row.get(offset + 8)?,
      created_at:         row.get(offset + 9)?,
    })
  }

  pub fn into_customer(self) -> Result<Customer> {
    Ok(Customer {
      customer_id:        decode_uuid(&self.customer_id)?,
      first_name:         self.first_name,
      last_name:          self.last_name,
      email:              self.email,
      phone:              self.phone,
      address:            self.address,
      hearing_loss_level: decode_enum("hearing_loss_level", &self.hearing_loss_level)?,
      budget:             decode_decimal(&self.budget)?,
      has_insurance:      self.has_insurance,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

pub const PRODUCT_COLUMNS: &str = "product_id, brand, model, kind, price, features,
   suitable_loss_levels, in_stock, created_at";

/// Raw values read directly from a `products` row.
pub struct RawProduct {
  pub product_id:           String,
  pub brand:                String,
  pub model:                String,
  pub kind:                 String,
  pub price:                String,
  pub features:             String,
  pub suitable_loss_levels: String,
  pub in_stock:             i64,
  pub created_at:           String,
}

impl RawProduct {
  pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      product_id:           row.get(offset)?,
      brand:                row.get(offset + 1)?,
      model:                row.get(offset + 2)?,
      kind:                 row.get(offset + 3)?,
      price:                row.get(offset + 4)?,
      features:             row.get(offset + 5)?,
      suitable_loss_levels: row.get(offset + 6)?,
      in_stock:             row.get(offset + 7)?,
      created_at:           row.get(offset + 8)?,
    })
  }

  pub fn into_product(self) -> Result<Product> {
    let suitable_loss_levels: Vec<HearingLossLevel> =
      serde_json::from_str(&self.suitable_loss_levels)?;
    Ok(Product {
      product_id: decode_uuid(&self.product_id)?,
      brand: self.brand,
      model: self.model,
      kind: decode_enum("kind", &self.kind)?,
      price: decode_decimal(&self.price)?,
      features: serde_json::from_str(&self.features)?,
      suitable_loss_levels,
      in_stock: decode_count("in_stock", self.in_stock)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const ORDER_COLUMNS: &str = "order_id, customer_id, status, total_amount,
   insurance_discount, final_amount, delivery_date, tracking_number, notes, created_at";

/// Raw values read directly from an `orders` row.
pub struct RawOrder {
  pub order_id:           String,
  pub customer_id:        String,
  pub status:             String,
  pub total_amount:       String,
  pub insurance_discount: String,
  pub final_amount:       String,
  pub delivery_date:      Option<String>,
  pub tracking_number:    Option<String>,
  pub notes:              Option<String>,
  pub created_at:         String,
}

impl RawOrder {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      order_id:           row.get(0)?,
      customer_id:        row.get(1)?,
      status:             row.get(2)?,
      total_amount:       row.get(3)?,
      insurance_discount: row.get(4)?,
      final_amount:       row.get(5)?,
      delivery_date:      row.get(6)?,
      tracking_number:    row.get(7)?,
      notes:              row.get(8)?,
      created_at:         row.get(9)?,
    })
  }

  pub fn into_order(self) -> Result<Order> {
    Ok(Order {
      order_id:           decode_uuid(&self.order_id)?,
      customer_id:        decode_uuid(&self.customer_id)?,
      status:             decode_enum("status", &self.status)?,
      total_amount:       decode_decimal(&self.total_amount)?,
      insurance_discount: decode_decimal(&self.insurance_discount)?,
      final_amount:       decode_decimal(&self.final_amount)?,
      delivery_date:      self.delivery_date.as_deref().map(decode_dt).transpose()?,
      tracking_number:    self.tracking_number,
      notes:              self.notes,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

pub const LINE_ITEM_COLUMNS: &str =
  "li.line_item_id, li.order_id, li.product_id, li.quantity, li.unit_price, li.ear_side";

/// Raw values read directly from a `line_items` row.
pub struct RawLineItem {
  pub line_item_id: String,
  pub order_id:     String,
  pub product_id:   String,
  pub quantity:     i64,
  pub unit_price:   String,
  pub ear_side:     String,
}

impl RawLineItem {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      line_item_id: row.get(0)?,
      order_id:     row.get(1)?,
      product_id:   row.get(2)?,
      quantity:     row.get(3)?,
      unit_price:   row.get(4)?,
      ear_side:     row.get(5)?,
    })
  }

  pub fn into_line_item(self) -> Result<LineItem> {
    Ok(LineItem {
      line_item_id: decode_uuid(&self.line_item_id)?,
      order_id:     decode_uuid(&self.order_id)?,
      product_id:   decode_uuid(&self.product_id)?,
      quantity:     decode_count("quantity", self.quantity)?,
      unit_price:   decode_decimal(&self.unit_price)?,
      ear_side:     decode_enum("ear_side", &self.ear_side)?,
    })
  }
}

pub const APPOINTMENT_COLUMNS: &str = "appointment_id, customer_id, order_id, appointment_type,
   scheduled_at, status, notes, created_at";

/// Raw values read directly from an `appointments` row.
pub struct RawAppointment {
  pub appointment_id:   String,
  pub customer_id:      String,
  pub order_id:         Option<String>,
  pub appointment_type: String,
  pub scheduled_at:     String,
  pub status:           String,
  pub notes:            Option<String>,
  pub created_at:       String,
}

impl RawAppointment {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      appointment_id:   row.get(0)?,
      customer_id:      row.get(1)?,
      order_id:         row.get(2)?,
      appointment_type: row.get(3)?,
      scheduled_at:     row.get(4)?,
      status:           row.get(5)?,
      notes:            row.get(6)?,
      created_at:       row.get(7)?,
    })
  }

  pub fn into_appointment(self) -> Result<Appointment> {
    Ok(Appointment {
      appointment_id:   decode_uuid(&self.appointment_id)?,
      customer_id:      decode_uuid(&self.customer_id)?,
      order_id:         self.order_id.as_deref().map(decode_uuid).transpose()?,
      appointment_type: self.appointment_type,
      scheduled_at:     decode_dt(&self.scheduled_at)?,
      status:           self.status,
      notes:            self.notes,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}
