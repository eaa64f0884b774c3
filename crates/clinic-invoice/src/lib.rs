//! Plain-text invoice documents for clinic orders.
//!
//! Pure synchronous; no HTTP or database dependencies. The renderer only
//! reads the hydrated order it is given.
//!
//! # Quick start
//!
//! ```no_run
//! use clinic_core::invoice::InvoiceRenderer;
//! use clinic_invoice::{InvoiceOptions, TextInvoice};
//!
//! # fn demo(order: &clinic_core::order::OrderDetails) -> clinic_core::Result<()> {
//! let renderer = TextInvoice::new(InvoiceOptions::default())?;
//! let bytes = renderer.render(order)?;
//! println!("{}", String::from_utf8_lossy(&bytes));
//! # Ok(())
//! # }
//! ```

pub mod error;
mod layout;

pub use error::{Error, Result};

use clinic_core::{invoice::InvoiceRenderer, order::OrderDetails};
use serde::Deserialize;

/// Smallest page that still fits the invoice header and a footer.
pub const MIN_LINES_PER_PAGE: usize = 8;

/// Formatting knobs, deserialised from the `[invoice]` config table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceOptions {
  pub currency_symbol: String,
  /// Body lines per page, excluding the page footer.
  pub lines_per_page:  usize,
}

impl Default for InvoiceOptions {
  fn default() -> Self {
    Self { currency_symbol: "₹".to_string(), lines_per_page: 50 }
  }
}

/// Renders invoices as paginated UTF-8 text. Pages are separated by a form
/// feed and each ends with a `Page n of m` footer.
#[derive(Debug, Clone)]
pub struct TextInvoice {
  options: InvoiceOptions,
}

impl TextInvoice {
  pub fn new(options: InvoiceOptions) -> Result<Self> {
    if options.lines_per_page < MIN_LINES_PER_PAGE {
      return Err(Error::PageTooShort {
        min: MIN_LINES_PER_PAGE,
        got: options.lines_per_page,
      });
    }
    Ok(Self { options })
  }

  pub fn options(&self) -> &InvoiceOptions { &self.options }
}

impl InvoiceRenderer for TextInvoice {
  fn media_type(&self) -> &'static str { "text/plain; charset=utf-8" }

  fn file_extension(&self) -> &'static str { "txt" }

  fn render(&self, order: &OrderDetails) -> clinic_core::Result<Vec<u8>> {
    let lines = layout::body_lines(order, &self.options.currency_symbol);
    Ok(layout::paginate(&lines, self.options.lines_per_page).into_bytes())
  }
}
