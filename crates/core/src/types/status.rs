//! Status enums for orders and contact messages.
//!
//! Earlier revisions of the storage data disagreed on the order status
//! vocabulary ({pending, resolved}, {pending, completed}, and the full
//! six-step tracking set). [`OrderStatus`] is the one canonical vocabulary;
//! the legacy spellings deserialize into it via serde aliases so old blobs
//! keep loading.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Defaults to `Pending`; records persisted without a status field are
/// normalized to the default when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    OutForDelivery,
    /// Legacy blobs spelled this "completed" or "resolved".
    #[serde(alias = "completed", alias = "resolved")]
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a cancel action is allowed from this status.
    ///
    /// Delivered and already-cancelled orders cannot be cancelled.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        !matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position in the tracking progress display, if the order is on the
    /// confirmed -> shipped -> out-for-delivery -> delivered path.
    ///
    /// `Pending` shows no progress yet and `Cancelled` has no position.
    #[must_use]
    pub const fn progress_step(&self) -> Option<usize> {
        match self {
            Self::Confirmed => Some(0),
            Self::Shipped => Some(1),
            Self::OutForDelivery => Some(2),
            Self::Delivered => Some(3),
            Self::Pending | Self::Cancelled => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Shipped => write!(f, "shipped"),
            Self::OutForDelivery => write!(f, "out-for-delivery"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "out-for-delivery" => Ok(Self::OutForDelivery),
            // Legacy vocabularies from older data revisions
            "delivered" | "completed" | "resolved" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Contact message status, toggled between the two states by the admin
/// panel's resolve/unresolve button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Pending,
    Resolved,
}

impl MessageStatus {
    /// The other state. Toggling twice returns the original state.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Pending => Self::Resolved,
            Self::Resolved => Self::Pending,
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_serde_kebab() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
        let parsed: OrderStatus = serde_json::from_str("\"out-for-delivery\"").unwrap();
        assert_eq!(parsed, OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_order_status_legacy_aliases() {
        let completed: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(completed, OrderStatus::Delivered);
        let resolved: OrderStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(resolved, OrderStatus::Delivered);

        assert_eq!(
            OrderStatus::from_str("completed").unwrap(),
            OrderStatus::Delivered
        );
    }

    #[test]
    fn test_order_status_cancellable() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_order_status_progress_step() {
        assert_eq!(OrderStatus::Pending.progress_step(), None);
        assert_eq!(OrderStatus::Confirmed.progress_step(), Some(0));
        assert_eq!(OrderStatus::Delivered.progress_step(), Some(3));
        assert_eq!(OrderStatus::Cancelled.progress_step(), None);
    }

    #[test]
    fn test_order_status_display_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_message_status_toggle_is_idempotent_pair() {
        let original = MessageStatus::Pending;
        assert_eq!(original.toggled().toggled(), original);
        assert_eq!(MessageStatus::Pending.toggled(), MessageStatus::Resolved);
    }
}
