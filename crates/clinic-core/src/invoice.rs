//! The document-rendering seam for invoices.

use crate::{Result, order::OrderDetails};

/// Turns a fully-hydrated order into a downloadable document.
///
/// Renderers receive the order by shared reference and produce bytes only.
pub trait InvoiceRenderer: Send + Sync {
  /// MIME type of the produced document, e.g. `text/plain; charset=utf-8`.
  fn media_type(&self) -> &'static str;

  /// File extension (without the dot) used in the download filename.
  fn file_extension(&self) -> &'static str;

  fn render(&self, order: &OrderDetails) -> Result<Vec<u8>>;
}
