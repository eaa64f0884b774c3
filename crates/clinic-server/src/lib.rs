//! HTTP host for the clinic order workflow.
//!
//! Wires the REST API from [`clinic_api`] under `/api`, adds request tracing,
//! and owns the runtime configuration read by the `clinic-server` binary.

pub mod seed;

use std::path::PathBuf;

use axum::Router;
use clinic_api::AppState;
use clinic_core::store::ClinicStore;
use clinic_invoice::InvoiceOptions;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CLINIC_`-prefixed environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  pub seed_demo_data: bool,
  pub invoice:        InvoiceOptions,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           5000,
      store_path:     PathBuf::from("clinic.db"),
      seed_demo_data: false,
      invoice:        InvoiceOptions::default(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level axum [`Router`]: the API nested under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ClinicStore + 'static,
{
  Router::new()
    .nest("/api", clinic_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
