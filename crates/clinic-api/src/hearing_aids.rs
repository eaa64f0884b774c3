//! Handlers for `/hearing-aids` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/hearing-aids` | Whole catalog |
//! | `GET`  | `/hearing-aids/recommend/:customer_id` | 404 if the customer is missing |

use axum::{
  Json,
  extract::State,
};
use clinic_core::{product::Product, recommend::recommend, store::ClinicStore};
use uuid::Uuid;

use crate::{AppState, error::{ApiError, ApiPath}};

/// `GET /hearing-aids`
pub async fn list<S: ClinicStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let products = state.store.list_products().await.map_err(ApiError::from_store)?;
  Ok(Json(products))
}

/// `GET /hearing-aids/recommend/:customer_id`
pub async fn recommend_for<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(customer_id): ApiPath<Uuid>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let customer = state
    .store
    .get_customer(customer_id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("customer {customer_id}")))?;
  let catalog = state.store.list_products().await.map_err(ApiError::from_store)?;
  Ok(Json(recommend(&customer, &catalog)))
}
