//! Order dashboard.
//!
//! Stat cards, the order table and a bar chart of orders per day. The
//! rendered page is cached until an order is deleted or the TTL runs out.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use orderdesk_core::{CartItem, Order};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    services::{DailyCount, ORDER_LISTING_PATH, OrderSummary, short_date, summarize},
    state::AppState,
};

/// Flash code set by the delete flow when the store refuses a delete.
pub const DELETE_FAILED: &str = "delete_failed";

const CHART_WIDTH: u32 = 640;
const CHART_PLOT_HEIGHT: u32 = 200;
const CHART_LABEL_HEIGHT: u32 = 40;

/// Query string of the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub error: Option<String>,
}

/// Dashboard metrics.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub orders: String,
    pub revenue: String,
}

impl From<&OrderSummary> for DashboardMetrics {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            orders: summary.total_orders.to_string(),
            revenue: summary.total_revenue.display_usd(),
        }
    }
}

/// One row of the order table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total: String,
    pub items: Vec<String>,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            date: short_date(order.created_at.date_naive()),
            name: order.name.clone().unwrap_or_default(),
            email: order.email.clone().unwrap_or_default(),
            phone: order.phone.clone().unwrap_or_default(),
            total: order.total_or_zero().display_usd(),
            items: order.cart_items.iter().map(item_line).collect(),
        }
    }
}

/// `Title x 2 ($12.00)`
fn item_line(item: &CartItem) -> String {
    format!(
        "{} x {} ({})",
        item.title.as_deref().unwrap_or("Untitled"),
        item.quantity.unwrap_or(0),
        item.price.map_or_else(|| "-".to_string(), |p| p.display_usd())
    )
}

/// A bar of the orders-per-day chart, in SVG user units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBarView {
    pub label: String,
    pub orders: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub label_x: u32,
}

/// SVG chart geometry for the daily histogram.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
    pub bars: Vec<ChartBarView>,
}

impl ChartView {
    /// Lay out one bar per day, scaled to the busiest day.
    #[must_use]
    pub fn from_daily(daily: &[DailyCount]) -> Self {
        let to_u32 = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);

        let slots = to_u32(daily.len()).max(1);
        let slot = CHART_WIDTH / slots;
        let bar_width = (slot * 3 / 5).max(1);
        let busiest = to_u32(daily.iter().map(|d| d.orders).max().unwrap_or(0)).max(1);

        let bars = daily
            .iter()
            .zip(0u32..)
            .map(|(day, index)| {
                let height = to_u32(day.orders).saturating_mul(CHART_PLOT_HEIGHT) / busiest;
                let slot_x = index * slot;
                ChartBarView {
                    label: day.label(),
                    orders: day.orders,
                    x: slot_x + (slot - bar_width.min(slot)) / 2,
                    y: CHART_PLOT_HEIGHT - height,
                    width: bar_width,
                    height,
                    label_x: slot_x + slot / 2,
                }
            })
            .collect();

        Self {
            width: CHART_WIDTH,
            height: CHART_PLOT_HEIGHT + CHART_LABEL_HEIGHT,
            baseline: CHART_PLOT_HEIGHT,
            bars,
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub error_message: Option<String>,
    pub metrics: DashboardMetrics,
    pub orders: Vec<OrderRowView>,
    pub chart: ChartView,
}

/// User-facing text for a flash code.
fn flash_message(code: &str) -> Option<String> {
    (code == DELETE_FAILED).then(|| "Failed to delete order. Please try again.".to_string())
}

/// Dashboard page handler.
///
/// # Errors
///
/// Returns `AppError::Template` if the page cannot be rendered.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let error_message = query.error.as_deref().and_then(flash_message);

    if error_message.is_none()
        && let Some(html) = state.page_cache().get(ORDER_LISTING_PATH).await
    {
        tracing::debug!("Serving cached order listing");
        return Ok(Html(html.to_string()));
    }

    let generation = state.page_cache().generation();
    let controller = state.orders();
    let fresh = controller.load().await;
    let orders = controller.snapshot().await;
    let summary = summarize(&orders);

    let template = DashboardTemplate {
        current_path: ORDER_LISTING_PATH.to_string(),
        error_message,
        metrics: DashboardMetrics::from(&summary),
        orders: orders.iter().map(OrderRowView::from).collect(),
        chart: ChartView::from_daily(&summary.daily),
    };
    let html = template.render()?;

    // Only cache pages built from a successful load and without a flash
    if fresh && template.error_message.is_none() {
        state
            .page_cache()
            .insert_if_current(ORDER_LISTING_PATH, html.as_str(), generation)
            .await;
    }

    tracing::debug!(user_id = %admin.user_id, orders = orders.len(), "Rendered order listing");
    Ok(Html(html))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use orderdesk_core::{OrderId, Price};
    use rust_decimal_macros::dec;

    fn day(d: u32, orders: usize) -> DailyCount {
        DailyCount {
            date: NaiveDate::from_ymd_opt(2025, 5, d).unwrap(),
            orders,
        }
    }

    #[test]
    fn test_chart_scales_to_busiest_day() {
        let chart = ChartView::from_daily(&[day(1, 1), day(2, 4), day(3, 2)]);

        let heights: Vec<u32> = chart.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![50, 200, 100]);

        let first = chart.bars.first().unwrap();
        assert_eq!(first.label, "5/1/2025");
        assert_eq!(first.y, 150);
        assert!(chart.bars.iter().all(|b| b.x + b.width <= chart.width));
    }

    #[test]
    fn test_chart_empty() {
        let chart = ChartView::from_daily(&[]);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.height, 240);
    }

    #[test]
    fn test_order_row_formatting() {
        let order = Order {
            id: OrderId::from("order-9"),
            name: Some("Ada".to_string()),
            email: None,
            phone: Some("555-0100".to_string()),
            total_price: Some(Price::new(dec!(1234.5))),
            cart_items: vec![CartItem {
                key: Some("k1".to_string()),
                title: Some("Chair".to_string()),
                quantity: Some(2),
                price: Some(Price::new(dec!(12))),
                image: None,
            }],
            created_at: Utc.with_ymd_and_hms(2025, 3, 7, 15, 0, 0).unwrap(),
        };

        let row = OrderRowView::from(&order);

        assert_eq!(row.date, "3/7/2025");
        assert_eq!(row.total, "$1,234.50");
        assert_eq!(row.email, "");
        assert_eq!(row.items, vec!["Chair x 2 ($12.00)".to_string()]);
    }

    #[test]
    fn test_flash_message() {
        assert!(flash_message(DELETE_FAILED).is_some());
        assert!(flash_message("something_else").is_none());
    }
}
