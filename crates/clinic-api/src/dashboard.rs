//! `GET /dashboard`: headline counts plus the newest orders and customers.

use axum::{Json, extract::State};
use clinic_core::{dashboard::DashboardSummary, store::ClinicStore};

use crate::{AppState, error::ApiError};

/// `GET /dashboard`
pub async fn summary<S: ClinicStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<DashboardSummary>, ApiError> {
  let orders = state.store.list_orders().await.map_err(ApiError::from_store)?;
  let customers = state.store.list_customers().await.map_err(ApiError::from_store)?;
  Ok(Json(DashboardSummary::build(orders, customers)))
}
