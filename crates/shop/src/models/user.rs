//! User account entity.

use serde::{Deserialize, Serialize};

use ecycle_core::{Email, Password};

/// A registered account. Email is the uniqueness key; the password is
/// stored as entered (no hashing step exists in this storage model) but
/// stays redacted in `Debug` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: Email,
    pub password: Password,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_stored_shape() {
        let json = r#"{"name":"Admin","email":"admin@ecyclehub.com","password":"admin123"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Admin");
        assert!(user.password.verify("admin123"));

        assert_eq!(serde_json::to_string(&user).unwrap(), json);
    }

    #[test]
    fn test_debug_hides_password() {
        let user: User = serde_json::from_str(
            r#"{"name":"A","email":"a@b.com","password":"hunter2"}"#,
        )
        .unwrap();
        assert!(!format!("{user:?}").contains("hunter2"));
    }
}
