//! Handlers for `/orders` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/orders` | Hydrated, creation order |
//! | `POST` | `/orders` | Body: `{"customer_id":..,"items":[{"product_id":..,"quantity":1,"ear_side":"left"}]}` |
//! | `GET`  | `/orders/:id` | 404 if not found |
//! | `PUT`  | `/orders/:id/status` | Body: `{"status":"shipped"}`; 400 on unknown status |
//! | `GET`  | `/orders/:id/invoice` | Rendered invoice download |

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
};
use clinic_core::{
  order::{NewOrder, Order, OrderDetails, OrderStatus, Transition},
  store::ClinicStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, ApiJson, ApiPath},
  etag::compute_etag,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /orders`
pub async fn list<S: ClinicStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<OrderDetails>>, ApiError> {
  let orders = state.store.list_orders().await.map_err(ApiError::from_store)?;
  Ok(Json(orders))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /orders`: prices are taken from the catalog, never from the body.
pub async fn create<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<NewOrder>,
) -> Result<impl IntoResponse, ApiError> {
  let order = state.store.create_order(body).await.map_err(ApiError::from_store)?;
  tracing::info!(
    order_id = %order.order_id,
    customer_id = %order.customer_id,
    final_amount = %order.final_amount,
    "order created"
  );
  Ok((StatusCode::CREATED, Json(order)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /orders/:id`
pub async fn get_one<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<OrderDetails>, ApiError> {
  fetch(&state, id).await.map(Json)
}

async fn fetch<S: ClinicStore>(state: &AppState<S>, id: Uuid) -> Result<OrderDetails, ApiError> {
  state
    .store
    .get_order(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("order {id}")))
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `PUT /orders/:id/status`
pub async fn update_status<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<StatusBody>,
) -> Result<Json<Order>, ApiError> {
  let status = OrderStatus::parse(&body.status)?;
  let (previous, order) = state
    .store
    .set_order_status(id, status)
    .await
    .map_err(ApiError::from_store)?;

  match status.transition_from(previous) {
    Transition::Backward => tracing::warn!(
      order_id = %id,
      from = %previous,
      to = %status,
      "order status moved backwards"
    ),
    _ => tracing::info!(order_id = %id, from = %previous, to = %status, "order status changed"),
  }
  Ok(Json(order))
}

// ─── Invoice ──────────────────────────────────────────────────────────────────

/// `GET /orders/:id/invoice`
pub async fn invoice<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let details = fetch(&state, id).await?;
  let body = state.invoices.render(&details)?;

  let disposition = format!(
    "attachment; filename=invoice-{id}.{}",
    state.invoices.file_extension()
  );
  let headers = [
    (header::CONTENT_TYPE, state.invoices.media_type().to_owned()),
    (header::CONTENT_DISPOSITION, disposition),
    (header::ETAG, compute_etag(&body)),
  ];
  Ok((StatusCode::OK, headers, body))
}
