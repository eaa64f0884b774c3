//! Error types for `clinic-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("order not found: {0}")]
  OrderNotFound(Uuid),

  #[error("appointment not found: {0}")]
  AppointmentNotFound(Uuid),

  #[error("validation failed: {0}")]
  Validation(String),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("unknown order status: {0:?}")]
  UnknownStatus(String),

  #[error("invoice rendering failed: {0}")]
  Render(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// The error names an entity id that does not resolve.
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::CustomerNotFound(_)
        | Self::ProductNotFound(_)
        | Self::OrderNotFound(_)
        | Self::AppointmentNotFound(_)
    )
  }

  /// The error was caused by malformed or constraint-violating input.
  pub fn is_invalid(&self) -> bool {
    matches!(
      self,
      Self::Validation(_) | Self::DuplicateEmail(_) | Self::UnknownStatus(_)
    )
  }

  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }
}

/// Reject blank (empty or whitespace-only) text for a required field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(format!("{field} must not be blank")));
  }
  Ok(())
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classification_is_disjoint() {
    let id = Uuid::new_v4();
    let not_found = [
      Error::CustomerNotFound(id),
      Error::ProductNotFound(id),
      Error::OrderNotFound(id),
      Error::AppointmentNotFound(id),
    ];
    for e in &not_found {
      assert!(e.is_not_found(), "{e}");
      assert!(!e.is_invalid(), "{e}");
    }

    let invalid = [
      Error::invalid("bad"),
      Error::DuplicateEmail("a@b.c".into()),
      Error::UnknownStatus("lost".into()),
    ];
    for e in &invalid {
      assert!(e.is_invalid(), "{e}");
      assert!(!e.is_not_found(), "{e}");
    }

    let render = Error::Render("boom".into());
    assert!(!render.is_invalid() && !render.is_not_found());
  }

  #[test]
  fn require_text_rejects_whitespace() {
    assert!(require_text("brand", "Signia").is_ok());
    let err = require_text("brand", "   ").unwrap_err();
    assert_eq!(err.to_string(), "validation failed: brand must not be blank");
  }
}
