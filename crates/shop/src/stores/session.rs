//! Accounts and session state.
//!
//! Login state is recorded twice: a boolean flag and the current-user
//! record. Both were always written together, but nothing stopped them
//! drifting apart; [`SessionStore::is_logged_in`] reconciles them and
//! clears both when they disagree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ecycle_core::{Email, EmailError, OrderId, Password, PasswordError};

use crate::error::StorageError;
use crate::models::User;
use crate::storage::{StorageHub, keys};

/// Errors from signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The submitted password failed validation.
    #[error(transparent)]
    WeakPassword(#[from] PasswordError),

    /// Signup with an empty name.
    #[error("name is required")]
    NameRequired,

    /// Signup where the confirmation did not match the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Signup with an email that already has an account.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Login with an unknown email or a wrong password. The two cases
    /// are deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Storage hub or backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Raw signup form fields, validated by [`SessionStore::signup`].
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Tracking-view selection: just the order id, persisted so the view
/// survives a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct SelectedOrder(OrderId);

/// Store for user accounts and the session keys.
#[derive(Debug, Clone)]
pub struct SessionStore {
    hub: Arc<StorageHub>,
    admin_email: Email,
}

impl SessionStore {
    /// Create a session store over a hub. `admin_email` marks which
    /// account gets the admin panel.
    #[must_use]
    pub fn new(hub: Arc<StorageHub>, admin_email: Email) -> Self {
        Self { hub, admin_email }
    }

    /// All registered accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.hub.get(keys::USERS)?)
    }

    /// Create the built-in admin account if no account holds the admin
    /// email yet.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn ensure_admin_account(&self) -> Result<(), super::StoreError> {
        let admin_email = self.admin_email.clone();
        let (_, created) = self
            .hub
            .update::<Vec<User>, _, _>(keys::USERS, |users| {
                if users.iter().any(|user| user.email == admin_email) {
                    return false;
                }
                users.push(User {
                    name: "Admin".to_owned(),
                    email: admin_email.clone(),
                    password: Password::from_stored("admin123".to_owned()),
                });
                true
            })?;
        if created {
            tracing::info!(email = %self.admin_email, "seeded admin account");
        }
        Ok(())
    }

    /// Register an account and log it in.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation, or [`AuthError::EmailTaken`]
    /// if the email already has an account.
    pub fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AuthError::NameRequired);
        }
        let email = Email::parse(&form.email)?;
        let password = Password::parse(&form.password)?;
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = User {
            name: name.to_owned(),
            email,
            password,
        };
        let (_, taken) = self
            .hub
            .update::<Vec<User>, _, _>(keys::USERS, |users| {
                if users.iter().any(|existing| existing.email == user.email) {
                    return true;
                }
                users.push(user.clone());
                false
            })?;
        if taken {
            return Err(AuthError::EmailTaken);
        }

        self.start_session(&user)?;
        tracing::info!(email = %user.email, "account created");
        Ok(user)
    }

    /// Log in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] unless exactly this
    /// email/password pair is registered.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .users()?
            .into_iter()
            .find(|user| user.email == email && user.password.verify(password))
            .ok_or(AuthError::InvalidCredentials)?;

        self.start_session(&user)?;
        tracing::info!(email = %user.email, "logged in");
        Ok(user)
    }

    /// Clear the session keys. A no-op when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.hub.remove(keys::LOGGED_IN)?;
        self.hub.remove(keys::CURRENT_USER)?;
        self.hub.remove(keys::SELECTED_ORDER)?;
        Ok(())
    }

    /// The logged-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        if self.is_logged_in()? {
            Ok(self.hub.get_opt(keys::CURRENT_USER)?)
        } else {
            Ok(None)
        }
    }

    /// Whether a session is active, reconciling the flag with the
    /// current-user record. When the two disagree both are cleared and
    /// the answer is false.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        let flag: bool = self.hub.get(keys::LOGGED_IN)?;
        let user: Option<User> = self.hub.get_opt(keys::CURRENT_USER)?;
        match (flag, user) {
            (true, Some(_)) => Ok(true),
            (false, None) => Ok(false),
            (flag, user) => {
                tracing::warn!(
                    flag,
                    has_user = user.is_some(),
                    "session keys disagree, clearing both"
                );
                self.hub.remove(keys::LOGGED_IN)?;
                self.hub.remove(keys::CURRENT_USER)?;
                Ok(false)
            }
        }
    }

    /// Whether the logged-in account is the admin.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn is_admin(&self) -> Result<bool, AuthError> {
        Ok(self
            .current_user()?
            .is_some_and(|user| user.email == self.admin_email))
    }

    /// Remember where to return after a login forced by a gated action.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn remember_redirect(&self, destination: &str) -> Result<(), AuthError> {
        self.hub.set(keys::REDIRECT_AFTER_LOGIN, destination)?;
        Ok(())
    }

    /// Consume the pending redirect, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn take_redirect(&self) -> Result<Option<String>, AuthError> {
        let destination: Option<String> = self.hub.get_opt(keys::REDIRECT_AFTER_LOGIN)?;
        if destination.is_some() {
            self.hub.remove(keys::REDIRECT_AFTER_LOGIN)?;
        }
        Ok(destination)
    }

    /// Remember which order the tracking view should show.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn select_order(&self, id: OrderId) -> Result<(), AuthError> {
        self.hub.set(keys::SELECTED_ORDER, &SelectedOrder(id))?;
        Ok(())
    }

    /// The order selected for tracking, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn selected_order(&self) -> Result<Option<OrderId>, AuthError> {
        let selected: Option<SelectedOrder> = self.hub.get_opt(keys::SELECTED_ORDER)?;
        Ok(selected.map(|SelectedOrder(id)| id))
    }

    fn start_session(&self, user: &User) -> Result<(), AuthError> {
        self.hub.set(keys::CURRENT_USER, user)?;
        self.hub.set(keys::LOGGED_IN, &true)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(
            Arc::new(StorageHub::in_memory()),
            "admin@ecyclehub.com".parse().unwrap(),
        )
    }

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[test]
    fn test_ensure_admin_account_is_idempotent() {
        let store = store();
        store.ensure_admin_account().unwrap();
        store.ensure_admin_account().unwrap();

        let users = store.users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Admin");
        assert!(users[0].password.verify("admin123"));
    }

    #[test]
    fn test_signup_logs_in() {
        let store = store();
        let user = store
            .signup(&form("Ada", "ada@example.com", "secret1", "secret1"))
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert!(store.is_logged_in().unwrap());
        assert_eq!(
            store.current_user().unwrap().unwrap().email,
            "ada@example.com".parse().unwrap()
        );
    }

    #[test]
    fn test_signup_validation() {
        let store = store();
        assert!(matches!(
            store.signup(&form("  ", "a@b.com", "secret1", "secret1")),
            Err(AuthError::NameRequired)
        ));
        assert!(matches!(
            store.signup(&form("A", "not-an-email", "secret1", "secret1")),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            store.signup(&form("A", "a@b.com", "short", "short")),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            store.signup(&form("A", "a@b.com", "secret1", "secret2")),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_duplicate_signup_rejected() {
        let store = store();
        store
            .signup(&form("Ada", "ada@example.com", "secret1", "secret1"))
            .unwrap();
        assert!(matches!(
            store.signup(&form("Other", "ada@example.com", "different1", "different1")),
            Err(AuthError::EmailTaken)
        ));
        assert_eq!(store.users().unwrap().len(), 1);
    }

    #[test]
    fn test_login_requires_exact_pair() {
        let store = store();
        store
            .signup(&form("Ada", "ada@example.com", "secret1", "secret1"))
            .unwrap();
        store.logout().unwrap();

        assert!(matches!(
            store.login("ada@example.com", "wrong-password"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login("nobody@example.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!store.is_logged_in().unwrap());

        store.login("ada@example.com", "secret1").unwrap();
        assert!(store.is_logged_in().unwrap());
    }

    #[test]
    fn test_logout_clears_session() {
        let store = store();
        store
            .signup(&form("Ada", "ada@example.com", "secret1", "secret1"))
            .unwrap();
        store.select_order(OrderId::new(5)).unwrap();

        store.logout().unwrap();
        assert!(!store.is_logged_in().unwrap());
        assert!(store.current_user().unwrap().is_none());
        assert!(store.selected_order().unwrap().is_none());
    }

    #[test]
    fn test_disagreeing_session_keys_are_cleared() {
        let store = store();
        // Flag set without a user record
        store.hub.set(keys::LOGGED_IN, &true).unwrap();
        assert!(!store.is_logged_in().unwrap());
        let flag: Option<bool> = store.hub.get_opt(keys::LOGGED_IN).unwrap();
        assert!(flag.is_none());
    }

    #[test]
    fn test_is_admin() {
        let store = store();
        store.ensure_admin_account().unwrap();
        store.login("admin@ecyclehub.com", "admin123").unwrap();
        assert!(store.is_admin().unwrap());

        store.logout().unwrap();
        store
            .signup(&form("Ada", "ada@example.com", "secret1", "secret1"))
            .unwrap();
        assert!(!store.is_admin().unwrap());
    }

    #[test]
    fn test_redirect_is_consumed_once() {
        let store = store();
        store.remember_redirect("checkout").unwrap();
        assert_eq!(store.take_redirect().unwrap().as_deref(), Some("checkout"));
        assert!(store.take_redirect().unwrap().is_none());
    }
}
