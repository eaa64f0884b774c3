//! Error types for the invoice renderer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lines_per_page must be at least {min}, got {got}")]
  PageTooShort { min: usize, got: usize },
}

impl From<Error> for clinic_core::Error {
  fn from(e: Error) -> Self { clinic_core::Error::Render(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
