//! Delivery estimates and tracking-progress display data.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use ecycle_core::OrderStatus;

use crate::config::ShopConfig;
use crate::models::Order;

/// Labels for the four-step tracking progress bar, in order.
pub const PROGRESS_STEPS: [&str; 4] = ["Confirmed", "Shipped", "Out for Delivery", "Delivered"];

/// Estimated delivery date for an order.
///
/// Delivered orders estimate their own date (zero days out); orders out
/// for delivery estimate tomorrow; everything else estimates the
/// configured base offset from the order date, plus up to
/// `delivery_jitter_days` random extra days when jitter is enabled.
#[must_use]
pub fn estimated_delivery(order: &Order, config: &ShopConfig) -> DateTime<Utc> {
    let days = match order.status {
        OrderStatus::Delivered => 0,
        OrderStatus::OutForDelivery => 1,
        _ => {
            let jitter = if config.delivery_jitter_days > 0 {
                rand::rng().random_range(0..=config.delivery_jitter_days)
            } else {
                0
            };
            config.delivery_days + jitter
        }
    };
    order.date + Duration::days(days)
}

/// The progress-bar steps with their reached/unreached state for an
/// order, or `None` for orders with no progress to show (pending and
/// cancelled).
#[must_use]
pub fn progress(order: &Order) -> Option<[(&'static str, bool); 4]> {
    let reached = order.status.progress_step()?;
    let mut steps = [("", false); 4];
    for (index, (slot, label)) in steps.iter_mut().zip(PROGRESS_STEPS).enumerate() {
        *slot = (label, index <= reached);
    }
    Some(steps)
}
