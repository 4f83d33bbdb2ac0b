//! Checkout, order history, and tracking commands.

use ecycle_core::OrderId;
use ecycle_shop::tracking;
use ecycle_shop::{CheckoutError, ShippingDetails};

use super::{CliError, open_shop};

/// Place an order from the current cart.
///
/// # Errors
///
/// Returns an error without a session, with an empty cart, or for blank
/// shipping fields.
pub fn checkout(
    name: &str,
    address: &str,
    phone: &str,
    payment: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let order = shop.checkout().place_order(&ShippingDetails {
        name: name.to_owned(),
        address: address.to_owned(),
        phone: phone.to_owned(),
        payment: payment.to_owned(),
    });
    match order {
        Ok(order) => {
            tracing::info!(total = %order.total, "{} placed", order.display_id());
            Ok(())
        }
        Err(CheckoutError::NotLoggedIn) => Err(CliError::NotLoggedIn.into()),
        Err(other) => Err(other.into()),
    }
}

/// List the logged-in account's orders, newest first.
///
/// # Errors
///
/// Returns an error without a session or if storage fails.
pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let user = shop
        .session()
        .current_user()?
        .ok_or(CliError::NotLoggedIn)?;

    let orders = shop.orders().list_for_user(&user.email)?;
    if orders.is_empty() {
        tracing::info!("no orders yet");
        return Ok(());
    }
    for order in orders {
        tracing::info!(
            status = %order.status,
            total = %order.total,
            date = %order.date.format("%Y-%m-%d"),
            "{}",
            order.display_id()
        );
    }
    Ok(())
}

/// Show tracking progress and the delivery estimate for an order, and
/// remember it as the selected order.
///
/// # Errors
///
/// Returns an error for an unknown order id or if storage fails.
pub fn track(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let id = OrderId::new(id);
    let order = shop
        .orders()
        .get(id)?
        .ok_or_else(|| format!("no order with id {id}"))?;
    shop.session().select_order(id)?;

    tracing::info!(status = %order.status, "{}", order.display_id());
    if let Some(steps) = tracking::progress(&order) {
        for (label, reached) in steps {
            let mark = if reached { "x" } else { " " };
            tracing::info!("[{mark}] {label}");
        }
    }
    let estimate = tracking::estimated_delivery(&order, shop.config());
    tracing::info!(estimated_delivery = %estimate.format("%Y-%m-%d"));
    Ok(())
}

/// Cancel an order that has not been delivered.
///
/// # Errors
///
/// Returns an error for an unknown id or a non-cancellable status.
pub fn cancel(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let cancelled = shop.orders().cancel(OrderId::new(id))?;
    tracing::info!("{} cancelled", cancelled.display_id());
    Ok(())
}
