//! Account and session commands.

use ecycle_shop::stores::session::SignupForm;

use super::open_shop;

/// Register an account and log in.
///
/// # Errors
///
/// Returns an error if validation fails or the email is taken.
pub fn signup(name: &str, email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let user = shop.session().signup(&SignupForm {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
    })?;
    tracing::info!(email = %user.email, "account created and logged in");
    Ok(())
}

/// Log in.
///
/// # Errors
///
/// Returns an error for bad credentials or if storage fails.
pub fn login(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let user = shop.session().login(email, password)?;
    if let Some(destination) = shop.session().take_redirect()? {
        tracing::info!(email = %user.email, "logged in - continue with `ecycle {destination}`");
    } else {
        tracing::info!(email = %user.email, "logged in");
    }
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.session().logout()?;
    tracing::info!("logged out");
    Ok(())
}

/// Print the logged-in account.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn whoami() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    match shop.session().current_user()? {
        Some(user) => {
            let role = if shop.session().is_admin()? {
                "admin"
            } else {
                "customer"
            };
            tracing::info!(email = %user.email, role, "{}", user.name);
        }
        None => tracing::info!("not logged in"),
    }
    Ok(())
}
