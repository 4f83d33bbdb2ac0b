//! Contact-form command.

use super::open_shop;

/// Send a contact message to the shop.
///
/// # Errors
///
/// Returns an error for blank fields or a bad email.
pub fn send(name: &str, email: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let stored = shop.messages().append(name, email, message)?;
    tracing::info!(id = %stored.id, "message sent - we'll get back to you soon");
    Ok(())
}
