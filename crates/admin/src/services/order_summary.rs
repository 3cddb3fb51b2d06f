//! Aggregates shown above the order table.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use orderdesk_core::{Order, Price};
use serde::Serialize;

/// Derived totals for a collection of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_revenue: Price,
    /// Orders per calendar day, oldest first.
    pub daily: Vec<DailyCount>,
}

/// Number of orders created on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub orders: usize,
}

impl DailyCount {
    /// Chart label, e.g. `3/7/2025`.
    #[must_use]
    pub fn label(&self) -> String {
        short_date(self.date)
    }
}

/// `M/D/YYYY` without zero padding.
#[must_use]
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Compute count, revenue, and the per-day histogram.
///
/// Orders without a stored total contribute zero revenue. Days are UTC
/// calendar dates of the creation timestamp.
#[must_use]
pub fn summarize(orders: &[Order]) -> OrderSummary {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in orders {
        *per_day.entry(order.created_at.date_naive()).or_default() += 1;
    }

    OrderSummary {
        total_orders: orders.len(),
        total_revenue: orders.iter().map(Order::total_or_zero).sum(),
        daily: per_day
            .into_iter()
            .map(|(date, orders)| DailyCount { date, orders })
            .collect(),
    }
}
