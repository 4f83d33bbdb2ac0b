//! Stored password type.
//!
//! Accounts store their password in plaintext (the storage layer has no
//! hashing step), so the wrapper's job is containment: the value is kept in
//! a [`SecretString`] and never appears in `Debug` output or logs. It still
//! serializes to the plain string because that is the persisted record
//! shape.

use secrecy::{ExposeSecret, SecretString};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Errors that can occur when validating a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
}

/// A stored account password.
///
/// Comparison is exact string equality - login succeeds iff the candidate
/// matches the stored value character for character.
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    /// Minimum password length enforced at signup.
    pub const MIN_LENGTH: usize = 6;

    /// Validate and wrap a password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::TooShort`] if the input is shorter than
    /// [`Self::MIN_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.len() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(SecretString::from(s.to_owned())))
    }

    /// Wrap an already-stored password without re-validating.
    ///
    /// Used when loading records persisted before the length rule existed.
    #[must_use]
    pub fn from_stored(s: String) -> Self {
        Self(SecretString::from(s))
    }

    /// Exact-match verification against a candidate.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.0.expose_secret() == candidate
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}

// The persisted record is the plain string; serialization must expose it.
impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PasswordVisitor;

        impl Visitor<'_> for PasswordVisitor {
            type Value = Password;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a password string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Password, E> {
                Ok(Password::from_stored(v.to_owned()))
            }
        }

        deserializer.deserialize_str(PasswordVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enforces_min_length() {
        assert_eq!(
            Password::parse("short"),
            Err(PasswordError::TooShort { min: 6 })
        );
        assert!(Password::parse("secret123").is_ok());
    }

    #[test]
    fn test_verify_exact_match_only() {
        let password = Password::parse("admin123").unwrap();
        assert!(password.verify("admin123"));
        assert!(!password.verify("Admin123"));
        assert!(!password.verify("admin123 "));
    }

    #[test]
    fn test_from_stored_skips_validation() {
        let password = Password::from_stored("abc".to_owned());
        assert!(password.verify("abc"));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::parse("supersecret").unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_serde_plaintext_roundtrip() {
        let password = Password::parse("admin123").unwrap();
        let json = serde_json::to_string(&password).unwrap();
        assert_eq!(json, "\"admin123\"");

        let parsed: Password = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, password);
    }
}
