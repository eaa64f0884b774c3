//! Appointment requests. No calendar logic: no conflict detection, no
//! cancellation beyond patching the `status` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, error::require_text, patch::nullable};

/// Status given to an appointment when the request does not name one.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "scheduled";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
  pub appointment_id:   Uuid,
  pub customer_id:      Uuid,
  pub order_id:         Option<Uuid>,
  /// Free-form tag, e.g. "fitting" or "follow-up".
  pub appointment_type: String,
  pub scheduled_at:     DateTime<Utc>,
  pub status:           String,
  pub notes:            Option<String>,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::ClinicStore::add_appointment`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
  pub customer_id:      Uuid,
  pub order_id:         Option<Uuid>,
  pub appointment_type: String,
  #[serde(alias = "scheduled_date")]
  pub scheduled_at:     DateTime<Utc>,
  pub status:           Option<String>,
  pub notes:            Option<String>,
}

impl NewAppointment {
  pub fn validate(&self) -> Result<()> {
    require_text("appointment_type", &self.appointment_type)
  }
}

/// A generic field patch; `None` leaves the stored value untouched. An
/// explicit `null` clears `order_id` or `notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
  pub customer_id:      Option<Uuid>,
  #[serde(default, deserialize_with = "nullable")]
  pub order_id:         Option<Option<Uuid>>,
  pub appointment_type: Option<String>,
  #[serde(alias = "scheduled_date")]
  pub scheduled_at:     Option<DateTime<Utc>>,
  pub status:           Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub notes:            Option<Option<String>>,
}

impl AppointmentPatch {
  pub fn apply(self, appt: &mut Appointment) {
    if let Some(v) = self.customer_id {
      appt.customer_id = v;
    }
    if let Some(v) = self.order_id {
      appt.order_id = v;
    }
    if let Some(v) = self.appointment_type {
      appt.appointment_type = v;
    }
    if let Some(v) = self.scheduled_at {
      appt.scheduled_at = v;
    }
    if let Some(v) = self.status {
      appt.status = v;
    }
    if let Some(v) = self.notes {
      appt.notes = v;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_scheduled_date_alias() {
    let appt: NewAppointment = serde_json::from_value(serde_json::json!({
      "customer_id": Uuid::nil(),
      "appointment_type": "fitting",
      "scheduled_date": "2030-01-02T10:00:00Z",
    }))
    .unwrap();
    assert!(appt.order_id.is_none());
    assert!(appt.status.is_none());
    assert!(appt.validate().is_ok());
  }

  #[test]
  fn patch_keeps_unset_fields() {
    let mut appt = Appointment {
      appointment_id:   Uuid::new_v4(),
      customer_id:      Uuid::new_v4(),
      order_id:         None,
      appointment_type: "fitting".into(),
      scheduled_at:     Utc::now(),
      status:           DEFAULT_APPOINTMENT_STATUS.into(),
      notes:            None,
      created_at:       Utc::now(),
    };
    let before = appt.clone();
    AppointmentPatch { status: Some("completed".into()), ..Default::default() }
      .apply(&mut appt);
    assert_eq!(appt.status, "completed");
    assert_eq!(appt.appointment_type, before.appointment_type);
    assert_eq!(appt.scheduled_at, before.scheduled_at);
  }

  #[test]
  fn patch_null_clears_and_absent_keeps() {
    let order_id = Uuid::new_v4();
    let mut appt = Appointment {
      appointment_id:   Uuid::new_v4(),
      customer_id:      Uuid::new_v4(),
      order_id:         Some(order_id),
      appointment_type: "fitting".into(),
      scheduled_at:     Utc::now(),
      status:           DEFAULT_APPOINTMENT_STATUS.into(),
      notes:            Some("bring old aids".into()),
      created_at:       Utc::now(),
    };

    let keep: AppointmentPatch =
      serde_json::from_value(serde_json::json!({ "status": "confirmed" })).unwrap();
    assert!(keep.notes.is_none());
    keep.apply(&mut appt);
    assert_eq!(appt.order_id, Some(order_id));
    assert_eq!(appt.notes.as_deref(), Some("bring old aids"));

    let clear: AppointmentPatch =
      serde_json::from_value(serde_json::json!({ "order_id": null, "notes": null })).unwrap();
    assert_eq!(clear.notes, Some(None));
    clear.apply(&mut appt);
    assert_eq!(appt.order_id, None);
    assert_eq!(appt.notes, None);
    assert_eq!(appt.status, "confirmed");
  }
}
