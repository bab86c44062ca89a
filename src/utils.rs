//! Utils

use jiff::{SignedDuration, Timestamp, civil::Date};

const MONTHS_RO: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// Format a date the way the shop displays it: day, Romanian month name,
/// year (e.g. `18 octombrie 2026`).
pub fn format_date(date: Date) -> String {
    let month = usize::try_from(date.month() - 1)
        .ok()
        .and_then(|index| MONTHS_RO.get(index))
        .copied()
        .unwrap_or_default();

    format!("{} {month} {}", date.day(), date.year())
}

/// Collapses a burst of triggers into one firing, `wait` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: SignedDuration,
    deadline: Option<Timestamp>,
}

impl Debouncer {
    /// Fire `wait` after the most recent trigger.
    pub fn new(wait: SignedDuration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record a trigger at `now`, pushing the deadline back.
    pub fn trigger(&mut self, now: Timestamp) {
        self.deadline = Some(now.checked_add(self.wait).unwrap_or(Timestamp::MAX));
    }

    /// Returns `true` once per burst, when the deadline has passed at `now`.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;

                true
            }
            _ => false,
        }
    }
}
