//! The `ClinicStore` trait: the repository interface the workflow runs on.
//!
//! The trait is implemented by storage backends (e.g. `clinic-store-sqlite`).
//! Higher layers (`clinic-api`, `clinic-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  appointment::{Appointment, AppointmentPatch, NewAppointment},
  customer::{Customer, CustomerPatch, NewCustomer},
  order::{NewOrder, Order, OrderDetails, OrderStatus},
  product::{NewProduct, Product},
};

// ─── Error classification ────────────────────────────────────────────────────

/// Backend errors expose the domain error they carry, if any, so that outer
/// layers can tell "not found" and "invalid input" apart from infrastructure
/// failures.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn domain(&self) -> Option<&crate::Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a clinic store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ClinicStore: Send + Sync {
  type Error: StoreError;

  // ── Customers ─────────────────────────────────────────────────────────

  /// Validate and persist a new customer. Fails with
  /// [`crate::Error::DuplicateEmail`] if the email is taken.
  fn add_customer(
    &self,
    input: NewCustomer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Retrieve a customer by UUID. Returns `None` if not found.
  fn get_customer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + '_;

  /// All customers in creation order.
  fn list_customers(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  /// Apply a validated partial update and return the stored result.
  fn update_customer(
    &self,
    id: Uuid,
    patch: CustomerPatch,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Insert a catalog entry. Used by seeding; the catalog is otherwise
  /// read-only.
  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  /// Insert several catalog entries in one transaction. Either every entry
  /// is written or none is.
  fn add_products(
    &self,
    inputs: Vec<NewProduct>,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  fn get_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// The whole catalog in insertion order.
  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  // ── Orders ────────────────────────────────────────────────────────────

  /// Price and persist an order with its line items, all-or-nothing.
  ///
  /// The customer and every product are resolved, priced at their current
  /// catalog price, and written inside a single transaction. Any unresolved
  /// id aborts the whole operation without leaving partial records.
  fn create_order(
    &self,
    input: NewOrder,
  ) -> impl Future<Output = Result<Order, Self::Error>> + Send + '_;

  /// Hydrated order (customer, line items, products). `None` if not found.
  fn get_order(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<OrderDetails>, Self::Error>> + Send + '_;

  /// All hydrated orders in creation order.
  fn list_orders(
    &self,
  ) -> impl Future<Output = Result<Vec<OrderDetails>, Self::Error>> + Send + '_;

  /// Overwrite the status of an order; pricing fields are untouched.
  ///
  /// Returns the status that was replaced together with the updated order.
  fn set_order_status(
    &self,
    id: Uuid,
    status: OrderStatus,
  ) -> impl Future<Output = Result<(OrderStatus, Order), Self::Error>> + Send + '_;

  // ── Appointments ──────────────────────────────────────────────────────

  /// Persist an appointment. The customer must exist, and so must the order
  /// when one is given.
  fn add_appointment(
    &self,
    input: NewAppointment,
  ) -> impl Future<Output = Result<Appointment, Self::Error>> + Send + '_;

  fn get_appointment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Appointment>, Self::Error>> + Send + '_;

  fn list_appointments(
    &self,
  ) -> impl Future<Output = Result<Vec<Appointment>, Self::Error>> + Send + '_;

  fn update_appointment(
    &self,
    id: Uuid,
    patch: AppointmentPatch,
  ) -> impl Future<Output = Result<Appointment, Self::Error>> + Send + '_;
}
