//! Invoice text layout and pagination.

use chrono::SecondsFormat;
use clinic_core::order::OrderDetails;
use rust_decimal::Decimal;

const RULE: &str = "----------------------";

/// Page separator (form feed).
pub(crate) const PAGE_BREAK: char = '\u{000C}';

fn money(symbol: &str, amount: Decimal) -> String { format!("{symbol}{amount:.2}") }

/// The unpaginated invoice body, one entry per printed line.
pub(crate) fn body_lines(details: &OrderDetails, symbol: &str) -> Vec<String> {
  let order = &details.order;
  let customer = &details.customer;

  let mut lines = vec![
    format!("Invoice #{}", order.order_id),
    format!(
      "Date: {}",
      order.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ),
    format!("Customer: {}", customer.full_name()),
    format!("Email: {}", customer.email),
    format!("Status: {}", order.status),
    RULE.to_string(),
  ];

  for line in &details.items {
    lines.push(format!(
      "{}: {} x {} ({}) = {}",
      line.product.display_name(),
      money(symbol, line.item.unit_price),
      line.item.quantity,
      line.item.ear_side,
      money(symbol, line.item.line_total()),
    ));
  }

  lines.push(RULE.to_string());
  lines.push(format!("Total: {}", money(symbol, order.total_amount)));
  lines.push(format!(
    "Insurance Discount: {}",
    money(symbol, order.insurance_discount)
  ));
  lines.push(format!("Final Amount: {}", money(symbol, order.final_amount)));
  lines
}

/// Split `lines` into pages of at most `per_page` lines, each followed by a
/// blank line and a `Page n of m` footer. An empty body still yields one page.
pub(crate) fn paginate(lines: &[String], per_page: usize) -> String {
  let per_page = per_page.max(1);
  let mut pages: Vec<&[String]> = lines.chunks(per_page).collect();
  if pages.is_empty() {
    pages.push(&[]);
  }
  let total = pages.len();

  let mut out = String::new();
  for (i, page) in pages.iter().enumerate() {
    if i > 0 {
      out.push(PAGE_BREAK);
    }
    for line in page.iter() {
      out.push_str(line);
      out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("Page {} of {}\n", i + 1, total));
  }
  out
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use clinic_core::{
    customer::{Customer, HearingLossLevel},
    invoice::InvoiceRenderer,
    order::{EarSide, LineItem, LineItemDetails, Order, OrderStatus},
    product::{HearingAidType, Product},
  };
  use uuid::Uuid;

  use super::*;
  use crate::{Error, InvoiceOptions, TextInvoice};

  fn product(model: &str, price: i64) -> Product {
    Product {
      product_id:           Uuid::new_v4(),
      brand:                "Signia".into(),
      model:                model.into(),
      kind:                 HearingAidType::Ite,
      price:                Decimal::from(price),
      features:             vec![],
      suitable_loss_levels: vec![HearingLossLevel::Moderate],
      in_stock:             3,
      created_at:           Utc::now(),
    }
  }

  fn details(item_count: usize) -> OrderDetails {
    let customer = Customer {
      customer_id:        Uuid::new_v4(),
      first_name:         "John".into(),
      last_name:          "Smith".into(),
      email:              "john@email.com".into(),
      phone:              None,
      address:            None,
      hearing_loss_level: HearingLossLevel::Moderate,
      budget:             Decimal::from(70_000),
      has_insurance:      true,
      created_at:         Utc::now(),
    };
    let order_id = Uuid::new_v4();
    let items: Vec<_> = (0..item_count)
      .map(|n| {
        let product = product(&format!("M{n}"), 30_000);
        LineItemDetails {
          item: LineItem {
            line_item_id: Uuid::new_v4(),
            order_id,
            product_id: product.product_id,
            quantity: 2,
            unit_price: product.price,
            ear_side: EarSide::Left,
          },
          product,
        }
      })
      .collect();
    let total = Decimal::from(60_000 * item_count as i64);
    let discount = total * Decimal::new(30, 2);
    OrderDetails {
      order: Order {
        order_id,
        customer_id: customer.customer_id,
        status: OrderStatus::Delivered,
        total_amount: total,
        insurance_discount: discount,
        final_amount: total - discount,
        delivery_date: None,
        tracking_number: None,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap(),
      },
      customer,
      items,
    }
  }

  fn render_text(options: InvoiceOptions, order: &OrderDetails) -> String {
    let bytes = TextInvoice::new(options).unwrap().render(order).unwrap();
    String::from_utf8(bytes).unwrap()
  }

  #[test]
  fn single_page_invoice_content() {
    let order = details(1);
    let text = render_text(InvoiceOptions::default(), &order);

    assert!(text.starts_with(&format!("Invoice #{}\n", order.order.order_id)));
    assert!(text.contains("Date: 2025-03-04T12:00:00Z"));
    assert!(text.contains("Customer: John Smith"));
    assert!(text.contains("Signia M0: ₹30000.00 x 2 (left) = ₹60000.00"));
    assert!(text.contains("Total: ₹60000.00"));
    assert!(text.contains("Insurance Discount: ₹18000.00"));
    assert!(text.contains("Final Amount: ₹42000.00"));
    assert!(text.ends_with("Page 1 of 1\n"));
    assert!(!text.contains(PAGE_BREAK));
  }

  #[test]
  fn long_orders_span_pages() {
    // 6 header + 20 items + 4 totals = 30 lines over 10-line pages.
    let order = details(20);
    let options = InvoiceOptions { currency_symbol: "$".into(), lines_per_page: 10 };
    let text = render_text(options, &order);

    let pages: Vec<_> = text.split(PAGE_BREAK).collect();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].ends_with("Page 1 of 3\n"));
    assert!(pages[2].ends_with("Page 3 of 3\n"));
    assert!(pages[2].contains("Final Amount: $"));
  }

  #[test]
  fn rendering_leaves_order_untouched() {
    let order = details(2);
    let before = order.clone();
    render_text(InvoiceOptions::default(), &order);
    assert_eq!(order, before);
  }

  #[test]
  fn tiny_pages_are_rejected() {
    let err = TextInvoice::new(InvoiceOptions {
      lines_per_page: 2,
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::PageTooShort { got: 2, .. }));
  }

  #[test]
  fn empty_body_still_has_a_page() {
    assert_eq!(paginate(&[], 10), "\nPage 1 of 1\n");
  }
}
