//! Admin panel commands: every order and the contact-message inbox.
//!
//! All of these require a session on the admin account
//! (`ECYCLE_ADMIN_EMAIL`, default `admin@ecyclehub.com`).

use ecycle_core::{MessageId, OrderId};

use super::{open_shop, require_admin};

/// List every order across all customers.
///
/// # Errors
///
/// Returns an error without an admin session or if storage fails.
pub fn orders() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    let orders = shop.orders().list()?;
    tracing::info!(count = orders.len(), "orders");
    for order in orders {
        tracing::info!(
            customer = %order.user_email,
            status = %order.status,
            total = %order.total,
            "{}",
            order.display_id()
        );
    }
    Ok(())
}

/// Toggle an order between pending and delivered.
///
/// # Errors
///
/// Returns an error without an admin session or for an unknown id.
pub fn toggle_order(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    let order = shop.orders().toggle_completed(OrderId::new(id))?;
    tracing::info!(status = %order.status, "{}", order.display_id());
    Ok(())
}

/// Delete an order from the history.
///
/// # Errors
///
/// Returns an error without an admin session or for an unknown id.
pub fn delete_order(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    shop.orders().delete(OrderId::new(id))?;
    tracing::info!(id, "order deleted");
    Ok(())
}

/// List contact messages.
///
/// # Errors
///
/// Returns an error without an admin session or if storage fails.
pub fn messages() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    let messages = shop.messages().list()?;
    tracing::info!(count = messages.len(), "contact messages");
    for message in messages {
        tracing::info!(
            id = %message.id,
            from = %message.email,
            status = %message.status,
            date = %message.date.format("%Y-%m-%d"),
            "{}: {}",
            message.name,
            message.message
        );
    }
    Ok(())
}

/// Toggle a message between pending and resolved.
///
/// # Errors
///
/// Returns an error without an admin session or for an unknown id.
pub fn resolve_message(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    let message = shop.messages().toggle_resolved(MessageId::new(id))?;
    tracing::info!(id = %message.id, status = %message.status, "message updated");
    Ok(())
}

/// Delete a contact message.
///
/// # Errors
///
/// Returns an error without an admin session or for an unknown id.
pub fn delete_message(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    shop.messages().delete(MessageId::new(id))?;
    tracing::info!(id, "message deleted");
    Ok(())
}
