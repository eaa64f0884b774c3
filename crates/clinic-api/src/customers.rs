//! Handlers for `/customers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/customers` | Creation order |
//! | `POST` | `/customers` | 400 on validation failure or duplicate email |
//! | `GET`  | `/customers/:id` | 404 if not found |
//! | `PUT`  | `/customers/:id` | Partial body; 404 / 400 |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use clinic_core::{
  customer::{Customer, CustomerPatch, NewCustomer},
  store::ClinicStore,
};
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, ApiJson, ApiPath},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /customers`
pub async fn list<S: ClinicStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
  let customers = state.store.list_customers().await.map_err(ApiError::from_store)?;
  Ok(Json(customers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /customers`
pub async fn create<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<NewCustomer>,
) -> Result<impl IntoResponse, ApiError> {
  let customer = state.store.add_customer(body).await.map_err(ApiError::from_store)?;
  tracing::info!(customer_id = %customer.customer_id, "customer created");
  Ok((StatusCode::CREATED, Json(customer)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /customers/:id`
pub async fn get_one<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Customer>, ApiError> {
  state
    .store
    .get_customer(id)
    .await
    .map_err(ApiError::from_store)?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("customer {id}")))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /customers/:id`: only the fields present in the body change.
pub async fn update<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(patch): ApiJson<CustomerPatch>,
) -> Result<Json<Customer>, ApiError> {
  let customer = state
    .store
    .update_customer(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(customer))
}
