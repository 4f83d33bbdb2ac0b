//! Contact-form message store.

use std::sync::Arc;

use chrono::Utc;

use ecycle_core::{Email, MessageId};

use super::{Result, StoreError};
use crate::models::ContactMessage;
use crate::storage::{StorageHub, keys};

/// Store for the contact-message key.
#[derive(Debug, Clone)]
pub struct MessageStore {
    hub: Arc<StorageHub>,
}

impl MessageStore {
    /// Create a message store over a hub.
    #[must_use]
    pub fn new(hub: Arc<StorageHub>) -> Self {
        Self { hub }
    }

    /// All messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.hub.get(keys::MESSAGES)?)
    }

    /// Record a contact-form submission. The id is the submission
    /// timestamp in epoch milliseconds, bumped past any colliding id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingField`] if the name or message is
    /// blank, or [`StoreError::InvalidEmail`] if the email fails
    /// validation.
    pub fn append(&self, name: &str, email: &str, body: &str) -> Result<ContactMessage> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        let email = Email::parse(email)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(StoreError::MissingField("message"));
        }

        let now = Utc::now();
        let mut message = ContactMessage {
            id: MessageId::new(now.timestamp_millis()),
            name: name.to_owned(),
            email,
            message: body.to_owned(),
            date: now,
            status: ecycle_core::MessageStatus::default(),
        };
        let (_, stored) = self
            .hub
            .update::<Vec<ContactMessage>, _, _>(keys::MESSAGES, |messages| {
                while messages.iter().any(|existing| existing.id == message.id) {
                    message.id = message.id.next();
                }
                messages.push(message.clone());
                message.clone()
            })?;
        tracing::info!(id = %stored.id, "contact message recorded");
        Ok(stored)
    }

    /// Flip a message between pending and resolved (admin panel).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no message has the id.
    pub fn toggle_resolved(&self, id: MessageId) -> Result<ContactMessage> {
        let (_, updated) = self
            .hub
            .update::<Vec<ContactMessage>, _, _>(keys::MESSAGES, |messages| {
                messages
                    .iter_mut()
                    .find(|message| message.id == id)
                    .map(|message| {
                        message.status = message.status.toggled();
                        message.clone()
                    })
            })?;
        updated.ok_or(StoreError::NotFound {
            entity: "message",
            id: id.as_i64(),
        })
    }

    /// Delete a message (admin panel).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no message has the id.
    pub fn delete(&self, id: MessageId) -> Result<()> {
        let (_, found) = self
            .hub
            .update::<Vec<ContactMessage>, _, _>(keys::MESSAGES, |messages| {
                let before = messages.len();
                messages.retain(|message| message.id != id);
                messages.len() != before
            })?;
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "message",
                id: id.as_i64(),
            })
        }
    }
}
