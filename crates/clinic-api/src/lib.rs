//! JSON REST API for the clinic order workflow.
//!
//! Exposes an axum [`Router`] backed by any [`clinic_core::store::ClinicStore`]
//! and an [`clinic_core::invoice::InvoiceRenderer`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", clinic_api::api_router(state))
//! ```

pub mod appointments;
pub mod customers;
pub mod dashboard;
pub mod error;
pub mod etag;
pub mod hearing_aids;
pub mod orders;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use clinic_core::{invoice::InvoiceRenderer, store::ClinicStore};

pub use error::{ApiError, ApiJson, ApiPath};

/// Shared handler state: the store plus the invoice renderer.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub invoices: Arc<dyn InvoiceRenderer>,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, invoices: Arc<dyn InvoiceRenderer>) -> Self {
    Self { store, invoices }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), invoices: Arc::clone(&self.invoices) }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ClinicStore + 'static,
{
  Router::new()
    // Customers
    .route("/customers", get(customers::list::<S>).post(customers::create::<S>))
    .route("/customers/{id}", get(customers::get_one::<S>).put(customers::update::<S>))
    // Catalog
    .route("/hearing-aids", get(hearing_aids::list::<S>))
    .route("/hearing-aids/recommend/{customer_id}", get(hearing_aids::recommend_for::<S>))
    // Orders
    .route("/orders", get(orders::list::<S>).post(orders::create::<S>))
    .route("/orders/{id}", get(orders::get_one::<S>))
    .route("/orders/{id}/status", put(orders::update_status::<S>))
    .route("/orders/{id}/invoice", get(orders::invoice::<S>))
    // Appointments
    .route(
      "/appointments",
      get(appointments::list::<S>).post(appointments::create::<S>),
    )
    .route(
      "/appointments/{id}",
      get(appointments::get_one::<S>).put(appointments::update::<S>),
    )
    // Dashboard
    .route("/dashboard", get(dashboard::summary::<S>))
    .with_state(state)
}
