//! Event types.
//!
//! Times are local wall-clock (`NaiveDateTime`). The calendar day an event
//! belongs to is the date of its start.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the id prefix shown to users.
pub const SHORT_ID_LEN: usize = 8;

/// Identifier assigned to an event when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }

    /// First `SHORT_ID_LEN` hex digits, used for display and lookup.
    pub fn short(&self) -> String {
        let mut s = self.0.simple().to_string();
        s.truncate(SHORT_ID_LEN);
        s
    }

    /// Whether this id starts with `prefix` (hyphens and case ignored).
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let wanted: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        !wanted.is_empty() && self.0.simple().to_string().starts_with(&wanted)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A titled, optionally located point in time (or time slot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    /// End of the slot, for events created from a time range
    pub end: Option<NaiveDateTime>,
}

impl Event {
    /// Build a new event with a fresh id.
    ///
    /// Returns `None` when the title is empty after trimming.
    pub fn new(title: &str, location: Option<&str>, start: NaiveDateTime) -> Option<Self> {
        Some(Event {
            id: EventId::new(),
            title: normalize_title(title)?,
            location: normalize_location(location),
            start,
            end: None,
        })
    }

    /// Local calendar date the event is bucketed under.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date() == date
    }

    /// Past means the start is strictly before `now`; equal counts as upcoming.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.start < now
    }

    /// "15:00" or "15:00-16:30" for slots.
    pub fn time_label(&self) -> String {
        match self.end {
            Some(end) if end.date() == self.start.date() => {
                format!("{}-{}", self.start.format("%H:%M"), end.format("%H:%M"))
            }
            Some(end) => format!(
                "{}-{}",
                self.start.format("%H:%M"),
                end.format("%b %-d %H:%M")
            ),
            None => self.start.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} @ {}", self.title, location),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Trimmed title, or `None` if nothing is left.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed location; blank input means no location.
pub fn normalize_location(location: Option<&str>) -> Option<String> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}
