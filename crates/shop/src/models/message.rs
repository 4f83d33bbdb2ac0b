//! Contact-form message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecycle_core::{Email, MessageId, MessageStatus};

/// A contact-form submission. Append-only except for the status toggle
/// and delete in the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Derived from the epoch-millisecond timestamp at submission.
    pub id: MessageId,
    pub name: String,
    pub email: Email,
    pub message: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
}
