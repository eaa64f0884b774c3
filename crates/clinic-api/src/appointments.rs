//! Handlers for `/appointments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/appointments` | Creation order |
//! | `POST` | `/appointments` | 404 if the customer or referenced order is missing |
//! | `GET`  | `/appointments/:id` | 404 if not found |
//! | `PUT`  | `/appointments/:id` | Partial body |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use clinic_core::{
  appointment::{Appointment, AppointmentPatch, NewAppointment},
  store::ClinicStore,
};
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, ApiJson, ApiPath},
};

/// `GET /appointments`
pub async fn list<S: ClinicStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
  let appointments = state.store.list_appointments().await.map_err(ApiError::from_store)?;
  Ok(Json(appointments))
}

/// `POST /appointments`
pub async fn create<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<NewAppointment>,
) -> Result<impl IntoResponse, ApiError> {
  let appointment = state.store.add_appointment(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /appointments/:id`
pub async fn get_one<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
  state
    .store
    .get_appointment(id)
    .await
    .map_err(ApiError::from_store)?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("appointment {id}")))
}

/// `PUT /appointments/:id`
pub async fn update<S: ClinicStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(patch): ApiJson<AppointmentPatch>,
) -> Result<Json<Appointment>, ApiError> {
  let appointment = state
    .store
    .update_appointment(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(appointment))
}
