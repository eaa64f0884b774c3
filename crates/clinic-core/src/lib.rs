//! Core types and trait definitions for the clinic order workflow.
//!
//! No HTTP or database dependencies.
//! Storage backends implement [`store::ClinicStore`]; document backends
//! implement [`invoice::InvoiceRenderer`].

pub mod appointment;
pub mod customer;
pub mod dashboard;
pub mod error;
pub mod invoice;
pub mod order;
mod patch;
pub mod pricing;
pub mod product;
pub mod recommend;
pub mod store;

pub use error::{Error, Result};
