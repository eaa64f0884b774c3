//! [`SqliteStore`], the SQLite implementation of [`ClinicStore`].

use std::path::Path;

use chrono::Utc;
use clinic_core::{
  appointment::{
    Appointment, AppointmentPatch, DEFAULT_APPOINTMENT_STATUS, NewAppointment,
  },
  customer::{Customer, CustomerPatch, NewCustomer},
  order::{LineItem, LineItemDetails, NewOrder, Order, OrderDetails, OrderStatus},
  pricing::price_order,
  product::{NewProduct, Product},
  store::ClinicStore,
};
use rusqlite::{Connection, OptionalExtension as _, params};
use uuid::Uuid;

use crate::{
  encode::{
    APPOINTMENT_COLUMNS, CUSTOMER_COLUMNS, ORDER_COLUMNS, PRODUCT_COLUMNS,
    LINE_ITEM_COLUMNS, RawAppointment, RawCustomer, RawLineItem, RawOrder,
    RawProduct, encode_decimal, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

type CoreError = clinic_core::Error;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A clinic store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All access
/// is serialised on the connection's worker thread; multi-record writes run
/// inside a transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .run(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the connection thread. Errors returned by `f` come back
  /// unchanged, including domain errors.
  async fn run<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| f(conn).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e))))
      .await
      .map_err(Error::from)
  }

  /// Number of rows in `table`. Only used by tests to check that failed
  /// writes leave nothing behind.
  #[cfg(test)]
  pub(crate) async fn count_rows(&self, table: &'static str) -> Result<i64> {
    self
      .run(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
      })
      .await
  }

  /// Raw catalog price change, standing in for an out-of-band catalog edit.
  #[cfg(test)]
  pub(crate) async fn set_product_price(
    &self,
    id: Uuid,
    price: rust_decimal::Decimal,
  ) -> Result<()> {
    self
      .run(move |conn| {
        conn.execute(
          "UPDATE products SET price = ?1 WHERE product_id = ?2",
          params![encode_decimal(price), encode_uuid(id)],
        )?;
        Ok(())
      })
      .await
  }
}

// ─── Row access ──────────────────────────────────────────────────────────────

fn select_customer(conn: &Connection, id: Uuid) -> Result<Option<Customer>> {
  conn
    .query_row(
      &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = ?1"),
      params![encode_uuid(id)],
      |row| RawCustomer::from_row(row, 0),
    )
    .optional()?
    .map(RawCustomer::into_customer)
    .transpose()
}

fn select_product(conn: &Connection, id: Uuid) -> Result<Option<Product>> {
  conn
    .query_row(
      &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1"),
      params![encode_uuid(id)],
      |row| RawProduct::from_row(row, 0),
    )
    .optional()?
    .map(RawProduct::into_product)
    .transpose()
}

fn select_order(conn: &Connection, id: Uuid) -> Result<Option<Order>> {
  conn
    .query_row(
      &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = ?1"),
      params![encode_uuid(id)],
      RawOrder::from_row,
    )
    .optional()?
    .map(RawOrder::into_order)
    .transpose()
}

fn select_appointment(conn: &Connection, id: Uuid) -> Result<Option<Appointment>> {
  conn
    .query_row(
      &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE appointment_id = ?1"),
      params![encode_uuid(id)],
      RawAppointment::from_row,
    )
    .optional()?
    .map(RawAppointment::into_appointment)
    .transpose()
}

/// Line items of an order with their products, in request order.
fn select_line_items(conn: &Connection, order_id: Uuid) -> Result<Vec<LineItemDetails>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {LINE_ITEM_COLUMNS},
            p.product_id, p.brand, p.model, p.kind, p.price, p.features,
            p.suitable_loss_levels, p.in_stock, p.created_at
     FROM line_items li
     JOIN products p ON p.product_id = li.product_id
     WHERE li.order_id = ?1
     ORDER BY li.position"
  ))?;

  let raws = stmt
    .query_map(params![encode_uuid(order_id)], |row| {
      Ok((RawLineItem::from_row(row)?, RawProduct::from_row(row, 6)?))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  raws
    .into_iter()
    .map(|(item, product)| {
      Ok(LineItemDetails {
        item:    item.into_line_item()?,
        product: product.into_product()?,
      })
    })
    .collect()
}

/// Assemble the read model for `order`.
fn hydrate(conn: &Connection, order: Order) -> Result<OrderDetails> {
  let customer = select_customer(conn, order.customer_id)?
    .ok_or(CoreError::CustomerNotFound(order.customer_id))?;
  let items = select_line_items(conn, order.order_id)?;
  Ok(OrderDetails { order, customer, items })
}

fn exists(conn: &Connection, sql: &str, id: Uuid) -> Result<bool> {
  Ok(
    conn
      .query_row(sql, params![encode_uuid(id)], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

fn require_customer(conn: &Connection, id: Uuid) -> Result<()> {
  if !exists(conn, "SELECT 1 FROM customers WHERE customer_id = ?1", id)? {
    return Err(CoreError::CustomerNotFound(id).into());
  }
  Ok(())
}

/// Resolve an order referenced by an appointment. Ownership by `customer_id`
/// is not required; a mismatch is only logged.
fn check_appointment_order(conn: &Connection, order_id: Uuid, customer_id: Uuid) -> Result<()> {
  let order = select_order(conn, order_id)?.ok_or(CoreError::OrderNotFound(order_id))?;
  if order.customer_id != customer_id {
    tracing::warn!(
      %order_id,
      %customer_id,
      owner = %order.customer_id,
      "appointment references an order of another customer"
    );
  }
  Ok(())
}

/// Map a UNIQUE violation on `customers.email` to a domain error.
fn email_conflict(e: rusqlite::Error, email: &str) -> Error {
  match e {
    rusqlite::Error::SqliteFailure(f, _)
      if f.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      CoreError::DuplicateEmail(email.to_owned()).into()
    }
    other => other.into(),
  }
}

/// Validate `input` and stamp it with a fresh id and creation time.
fn new_product(input: NewProduct) -> Result<Product> {
  input.validate()?;
  Ok(Product {
    product_id:           Uuid::new_v4(),
    brand:                input.brand,
    model:                input.model,
    kind:                 input.kind,
    price:                input.price,
    features:             input.features,
    suitable_loss_levels: input.suitable_loss_levels,
    in_stock:             input.in_stock,
    created_at:           Utc::now(),
  })
}

fn insert_product(conn: &Connection, product: &Product) -> Result<()> {
  conn.execute(
    "INSERT INTO products (
       product_id, brand, model, kind, price, features,
       suitable_loss_levels, in_stock, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    params![
      encode_uuid(product.product_id),
      product.brand,
      product.model,
      product.kind.as_ref(),
      encode_decimal(product.price),
      serde_json::to_string(&product.features)?,
      serde_json::to_string(&product.suitable_loss_levels)?,
      i64::from(product.in_stock),
      encode_dt(product.created_at),
    ],
  )?;
  Ok(())
}

// ─── ClinicStore impl ────────────────────────────────────────────────────────

impl ClinicStore for SqliteStore {
  type Error = Error;

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn add_customer(&self, input: NewCustomer) -> Result<Customer> {
    input.validate()?;

    let customer = Customer {
      customer_id:        Uuid::new_v4(),
      first_name:         input.first_name,
      last_name:          input.last_name,
      email:              input.email.trim().to_owned(),
      phone:              input.phone,
      address:            input.address,
      hearing_loss_level: input.hearing_loss_level,
      budget:             input.budget,
      has_insurance:      input.has_insurance,
      created_at:         Utc::now(),
    };

    let row = customer.clone();
    self
      .run(move |conn| {
        conn
          .execute(
            "INSERT INTO customers (
               customer_id, first_name, last_name, email, phone, address,
               hearing_loss_level, budget, has_insurance, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
              encode_uuid(row.customer_id),
              row.first_name,
              row.last_name,
              row.email,
              row.phone,
              row.address,
              row.hearing_loss_level.as_ref(),
              encode_decimal(row.budget),
              row.has_insurance,
              encode_dt(row.created_at),
            ],
          )
          .map_err(|e| email_conflict(e, &row.email))?;
        Ok(())
      })
      .await?;

    Ok(customer)
  }

  async fn get_customer(&self, id: Uuid) -> Result<Option<Customer>> {
    self.run(move |conn| select_customer(conn, id)).await
  }

  async fn list_customers(&self) -> Result<Vec<Customer>> {
    self
      .run(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY rowid"))?;
        let raws = stmt
          .query_map([], |row| RawCustomer::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawCustomer::into_customer).collect()
      })
      .await
  }

  async fn update_customer(&self, id: Uuid, patch: CustomerPatch) -> Result<Customer> {
    patch.validate()?;

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let mut customer =
          select_customer(&tx, id)?.ok_or(CoreError::CustomerNotFound(id))?;
        patch.apply(&mut customer);
        customer.email = customer.email.trim().to_owned();

        tx.execute(
          "UPDATE customers SET
             first_name = ?2, last_name = ?3, email = ?4, phone = ?5, address = ?6,
             hearing_loss_level = ?7, budget = ?8, has_insurance = ?9
           WHERE customer_id = ?1",
          params![
            encode_uuid(id),
            customer.first_name,
            customer.last_name,
            customer.email,
            customer.phone,
            customer.address,
            customer.hearing_loss_level.as_ref(),
            encode_decimal(customer.budget),
            customer.has_insurance,
          ],
        )
        .map_err(|e| email_conflict(e, &customer.email))?;

        tx.commit()?;
        Ok(customer)
      })
      .await
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn add_product(&self, input: NewProduct) -> Result<Product> {
    let product = new_product(input)?;
    let row = product.clone();
    self.run(move |conn| insert_product(conn, &row)).await?;
    Ok(product)
  }

  async fn add_products(&self, inputs: Vec<NewProduct>) -> Result<Vec<Product>> {
    let products = inputs.into_iter().map(new_product).collect::<Result<Vec<_>>>()?;
    let rows = products.clone();
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        for row in &rows {
          insert_product(&tx, row)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(products)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    self.run(move |conn| select_product(conn, id)).await
  }

  async fn list_products(&self) -> Result<Vec<Product>> {
    self
      .run(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"))?;
        let raws = stmt
          .query_map([], |row| RawProduct::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawProduct::into_product).collect()
      })
      .await
  }

  // ── Orders ────────────────────────────────────────────────────────────────

  async fn create_order(&self, input: NewOrder) -> Result<Order> {
    input.validate()?;

    self
      .run(move |conn| {
        // Dropping `tx` without commit rolls back every insert below.
        let tx = conn.transaction()?;

        let customer = select_customer(&tx, input.customer_id)?
          .ok_or(CoreError::CustomerNotFound(input.customer_id))?;

        let mut lines = Vec::with_capacity(input.items.len());
        for item in &input.items {
          let product = select_product(&tx, item.product_id)?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;
          lines.push((item, product.price));
        }

        let pricing = price_order(
          customer.has_insurance,
          lines.iter().map(|(item, price)| (*price, item.quantity)),
        );

        let order = Order {
          order_id:           Uuid::new_v4(),
          customer_id:        customer.customer_id,
          status:             OrderStatus::default(),
          total_amount:       pricing.total_amount,
          insurance_discount: pricing.insurance_discount,
          final_amount:       pricing.final_amount,
          delivery_date:      None,
          tracking_number:    None,
          notes:              input.notes.clone(),
          created_at:         Utc::now(),
        };

        tx.execute(
          "INSERT INTO orders (
             order_id, customer_id, status, total_amount, insurance_discount,
             final_amount, notes, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          params![
            encode_uuid(order.order_id),
            encode_uuid(order.customer_id),
            order.status.as_ref(),
            encode_decimal(order.total_amount),
            encode_decimal(order.insurance_discount),
            encode_decimal(order.final_amount),
            order.notes,
            encode_dt(order.created_at),
          ],
        )?;

        for (position, (item, unit_price)) in lines.iter().enumerate() {
          let line = LineItem {
            line_item_id: Uuid::new_v4(),
            order_id:     order.order_id,
            product_id:   item.product_id,
            quantity:     item.quantity,
            unit_price:   *unit_price,
            ear_side:     item.ear_side,
          };
          tx.execute(
            "INSERT INTO line_items (
               line_item_id, order_id, product_id, position, quantity, unit_price, ear_side
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
              encode_uuid(line.line_item_id),
              encode_uuid(line.order_id),
              encode_uuid(line.product_id),
              position as i64,
              i64::from(line.quantity),
              encode_decimal(line.unit_price),
              line.ear_side.as_ref(),
            ],
          )?;
        }

        tx.commit()?;
        Ok(order)
      })
      .await
  }

  async fn get_order(&self, id: Uuid) -> Result<Option<OrderDetails>> {
    self
      .run(move |conn| {
        select_order(conn, id)?
          .map(|order| hydrate(conn, order))
          .transpose()
      })
      .await
  }

  async fn list_orders(&self) -> Result<Vec<OrderDetails>> {
    self
      .run(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY rowid"))?;
        let raws = stmt
          .query_map([], RawOrder::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);

        raws
          .into_iter()
          .map(|raw| hydrate(conn, raw.into_order()?))
          .collect()
      })
      .await
  }

  async fn set_order_status(
    &self,
    id:     Uuid,
    status: OrderStatus,
  ) -> Result<(OrderStatus, Order)> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let mut order = select_order(&tx, id)?.ok_or(CoreError::OrderNotFound(id))?;
        let previous = order.status;

        tx.execute(
          "UPDATE orders SET status = ?2 WHERE order_id = ?1",
          params![encode_uuid(id), status.as_ref()],
        )?;
        tx.commit()?;

        order.status = status;
        Ok((previous, order))
      })
      .await
  }

  // ── Appointments ──────────────────────────────────────────────────────────

  async fn add_appointment(&self, input: NewAppointment) -> Result<Appointment> {
    input.validate()?;

    let appointment = Appointment {
      appointment_id:   Uuid::new_v4(),
      customer_id:      input.customer_id,
      order_id:         input.order_id,
      appointment_type: input.appointment_type,
      scheduled_at:     input.scheduled_at,
      status:           input
        .status
        .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_owned()),
      notes:            input.notes,
      created_at:       Utc::now(),
    };

    let row = appointment.clone();
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        require_customer(&tx, row.customer_id)?;
        if let Some(order_id) = row.order_id {
          check_appointment_order(&tx, order_id, row.customer_id)?;
        }

        tx.execute(
          "INSERT INTO appointments (
             appointment_id, customer_id, order_id, appointment_type,
             scheduled_at, status, notes, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          params![
            encode_uuid(row.appointment_id),
            encode_uuid(row.customer_id),
            row.order_id.map(encode_uuid),
            row.appointment_type,
            encode_dt(row.scheduled_at),
            row.status,
            row.notes,
            encode_dt(row.created_at),
          ],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(appointment)
  }

  async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
    self.run(move |conn| select_appointment(conn, id)).await
  }

  async fn list_appointments(&self) -> Result<Vec<Appointment>> {
    self
      .run(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY rowid"))?;
        let raws = stmt
          .query_map([], RawAppointment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawAppointment::into_appointment).collect()
      })
      .await
  }

  async fn update_appointment(
    &self,
    id:    Uuid,
    patch: AppointmentPatch,
  ) -> Result<Appointment> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let mut appt =
          select_appointment(&tx, id)?.ok_or(CoreError::AppointmentNotFound(id))?;

        if let Some(customer_id) = patch.customer_id {
          require_customer(&tx, customer_id)?;
        }
        patch.apply(&mut appt);
        if let Some(order_id) = appt.order_id {
          check_appointment_order(&tx, order_id, appt.customer_id)?;
        }

        tx.execute(
          "UPDATE appointments SET
             customer_id = ?2, order_id = ?3, appointment_type = ?4,
             scheduled_at = ?5, status = ?6, notes = ?7
           WHERE appointment_id = ?1",
          params![
            encode_uuid(id),
            encode_uuid(appt.customer_id),
            appt.order_id.map(encode_uuid),
            appt.appointment_type,
            encode_dt(appt.scheduled_at),
            appt.status,
            appt.notes,
          ],
        )?;
        tx.commit()?;
        Ok(appt)
      })
      .await
  }
}
