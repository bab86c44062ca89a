//! Notifications
//!
//! Transient, dismissible banners. Each banner expires a fixed time after it
//! was shown; the stack is capped and evicts the oldest banner first.

use std::collections::VecDeque;

use jiff::{SignedDuration, Timestamp};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

new_key_type! {
    /// Notification Key
    pub struct NotificationKey;
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Completed action (item added, order placed).
    Success,

    /// Failed action.
    Error,

    /// Refused action that needs the user's attention.
    Warning,

    /// Neutral information.
    Info,
}

impl Severity {
    /// Icon name shown next to the message.
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Info => "info-circle",
        }
    }

    /// CSS class for the banner.
    pub fn class(self) -> &'static str {
        match self {
            Severity::Success => "notification-success",
            Severity::Error => "notification-error",
            Severity::Warning => "notification-warning",
            Severity::Info => "notification-info",
        }
    }
}

/// A single banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text.
    pub message: String,

    /// Banner severity.
    pub severity: Severity,

    /// When the banner was shown.
    pub shown_at: Timestamp,

    /// When the banner dismisses itself.
    pub expires_at: Timestamp,
}

/// Bounded stack of live banners, oldest first.
#[derive(Debug)]
pub struct Notifications {
    entries: SlotMap<NotificationKey, Notification>,
    order: VecDeque<NotificationKey>,
    timeout: SignedDuration,
    limit: usize,
}

impl Notifications {
    /// Create an empty stack. A `limit` of zero is treated as one.
    pub fn new(timeout: SignedDuration, limit: usize) -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: VecDeque::new(),
            timeout,
            limit: limit.max(1),
        }
    }

    /// Show a banner, evicting the oldest ones if the stack is full.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Timestamp,
    ) -> NotificationKey {
        while self.order.len() >= self.limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };

            self.entries.remove(oldest);
        }

        let notification = Notification {
            message: message.into(),
            severity,
            shown_at: now,
            expires_at: now.checked_add(self.timeout).unwrap_or(Timestamp::MAX),
        };

        debug!(?severity, message = %notification.message, "notification shown");

        let key = self.entries.insert(notification);
        self.order.push_back(key);

        key
    }

    /// Dismiss a banner. Dismissing one that is already gone returns `None`.
    pub fn dismiss(&mut self, key: NotificationKey) -> Option<Notification> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|candidate| *candidate != key);

        Some(removed)
    }

    /// Drop every banner whose timeout has elapsed at `now`.
    ///
    /// Returns the number of banners removed.
    pub fn expire(&mut self, now: Timestamp) -> usize {
        let before = self.order.len();
        let entries = &mut self.entries;

        self.order.retain(|key| {
            let expired = entries
                .get(*key)
                .is_none_or(|notification| notification.expires_at <= now);

            if expired {
                entries.remove(*key);
            }

            !expired
        });

        before - self.order.len()
    }

    /// Look up a live banner.
    pub fn get(&self, key: NotificationKey) -> Option<&Notification> {
        self.entries.get(key)
    }

    /// Live banners, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (NotificationKey, &Notification)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(*key).map(|notification| (*key, notification)))
    }

    /// Number of live banners.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no banner is shown.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
