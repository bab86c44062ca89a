//! Contact form
//!
//! Messages sent from the contact page, separate from orders and the cart.

use std::fmt;

use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{checkout::FieldProblem, validation::is_valid_email};

/// Notification shown once a contact message has been delivered.
pub const CONTACT_SENT_MESSAGE: &str = "Mesajul a fost trimis cu succes!";

/// Notification shown when a contact message was not delivered.
pub const CONTACT_FAILED_MESSAGE: &str = "Mesajul nu a putut fi trimis.";

/// A detail collected by the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Sender name.
    Name,

    /// Reply address.
    Email,

    /// Message body.
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactField::Name => "Numele",
            ContactField::Email => "Emailul",
            ContactField::Message => "Mesajul",
        })
    }
}

/// Errors raised while sending a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// A field is blank or malformed.
    #[error("Invalid contact field {field:?}: {problem}")]
    Invalid {
        /// First failing field.
        field: ContactField,

        /// What is wrong with it.
        problem: FieldProblem,
    },

    /// The service received the message and refused it.
    #[error("Message rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("Contact service unavailable: {0}")]
    Unavailable(String),
}

impl ContactError {
    /// Text shown to the sender.
    pub fn notice(&self) -> String {
        match self {
            ContactError::Invalid { field, problem } => {
                format!("Verifică datele: {field} {problem}")
            }
            ContactError::Rejected(_) | ContactError::Unavailable(_) => {
                CONTACT_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// Values submitted through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,

    /// Reply address.
    pub email: String,

    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// Check that every field is filled in and, when `check_email` is set,
    /// that the email looks like one.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Invalid`] for the first failing field.
    pub fn validate(&self, check_email: bool) -> Result<(), ContactError> {
        for (field, value) in [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Message, &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::Invalid {
                    field,
                    problem: FieldProblem::Missing,
                });
            }
        }

        if check_email && !is_valid_email(self.email.trim()) {
            return Err(ContactError::Invalid {
                field: ContactField::Email,
                problem: FieldProblem::InvalidEmail,
            });
        }

        Ok(())
    }
}

/// Delivers contact messages to the shop.
#[automock]
pub trait ContactGateway {
    /// Send a validated message.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`] if the message was not delivered.
    fn send_message(&mut self, form: &ContactForm) -> Result<(), ContactError>;
}

/// A message recorded by [`ContactInbox`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedMessage {
    /// Sender name.
    pub name: String,

    /// Reply address.
    pub email: String,

    /// Message body.
    pub message: String,

    /// When the message arrived.
    pub received_at: Timestamp,
}

/// Accepts every message, logs it and keeps it in memory.
#[derive(Debug, Default)]
pub struct ContactInbox {
    messages: Vec<ReceivedMessage>,
}

impl ContactInbox {
    /// Create an empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> &[ReceivedMessage] {
        &self.messages
    }
}

impl ContactGateway for ContactInbox {
    fn send_message(&mut self, form: &ContactForm) -> Result<(), ContactError> {
        let received = ReceivedMessage {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
            received_at: Timestamp::now(),
        };

        info!(from = %received.name, message = %received.message, "contact message received");

        self.messages.push(received);

        Ok(())
    }
}
