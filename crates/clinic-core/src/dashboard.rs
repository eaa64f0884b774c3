//! Clinic dashboard summary, computed from the order and customer lists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{customer::Customer, order::OrderDetails};

/// How many recent orders and customers the dashboard shows.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
  pub total_orders:     usize,
  pub total_customers:  usize,
  /// Orders not yet fitted.
  pub pending_orders:   usize,
  pub completed_orders: usize,
  /// Sum of final amounts over all orders.
  pub revenue:          Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub stats:            DashboardStats,
  /// Newest first.
  pub recent_orders:    Vec<OrderDetails>,
  /// Newest first.
  pub recent_customers: Vec<Customer>,
}

impl DashboardSummary {
  /// Summarise `orders` and `customers`, both given in creation order.
  pub fn build(orders: Vec<OrderDetails>, customers: Vec<Customer>) -> Self {
    let completed_orders = orders.iter().filter(|o| o.order.status.is_completed()).count();
    let stats = DashboardStats {
      total_orders: orders.len(),
      total_customers: customers.len(),
      pending_orders: orders.len() - completed_orders,
      completed_orders,
      revenue: orders.iter().map(|o| o.order.final_amount).sum(),
    };

    Self {
      stats,
      recent_orders: orders.into_iter().rev().take(RECENT_LIMIT).collect(),
      recent_customers: customers.into_iter().rev().take(RECENT_LIMIT).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::{
    customer::HearingLossLevel,
    order::{Order, OrderStatus},
  };

  fn customer(n: usize) -> Customer {
    Customer {
      customer_id:        Uuid::new_v4(),
      first_name:         format!("C{n}"),
      last_name:          String::new(),
      email:              format!("c{n}@example.com"),
      phone:              None,
      address:            None,
      hearing_loss_level: HearingLossLevel::Mild,
      budget:             Decimal::ZERO,
      has_insurance:      false,
      created_at:         Utc::now(),
    }
  }

  fn order(customer: &Customer, status: OrderStatus, final_amount: i64) -> OrderDetails {
    OrderDetails {
      order:    Order {
        order_id:           Uuid::new_v4(),
        customer_id:        customer.customer_id,
        status,
        total_amount:       Decimal::from(final_amount),
        insurance_discount: Decimal::ZERO,
        final_amount:       Decimal::from(final_amount),
        delivery_date:      None,
        tracking_number:    None,
        notes:              None,
        created_at:         Utc::now(),
      },
      customer: customer.clone(),
      items:    vec![],
    }
  }

  #[test]
  fn counts_and_revenue() {
    let customers: Vec<_> = (0..7).map(customer).collect();
    let orders = vec![
      order(&customers[0], OrderStatus::Ordered, 100),
      order(&customers[1], OrderStatus::Fitted, 250),
      order(&customers[2], OrderStatus::Shipped, 50),
    ];
    let summary = DashboardSummary::build(orders, customers);

    assert_eq!(summary.stats.total_orders, 3);
    assert_eq!(summary.stats.total_customers, 7);
    assert_eq!(summary.stats.pending_orders, 2);
    assert_eq!(summary.stats.completed_orders, 1);
    assert_eq!(summary.stats.revenue, Decimal::from(400));

    assert_eq!(summary.recent_customers.len(), RECENT_LIMIT);
    assert_eq!(summary.recent_customers[0].first_name, "C6");
    assert_eq!(summary.recent_orders[0].order.final_amount, Decimal::from(50));
  }

  #[test]
  fn empty_store_summary() {
    let summary = DashboardSummary::build(vec![], vec![]);
    assert_eq!(summary.stats.total_orders, 0);
    assert_eq!(summary.stats.revenue, Decimal::ZERO);
    assert!(summary.recent_orders.is_empty());
  }
}
