//! Past/upcoming classification.
//!
//! Comparison is by full timestamp: an event earlier today than `now` is past.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Past,
    Upcoming,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Past, FilterMode::Upcoming];

    pub fn matches(self, event: &Event, now: NaiveDateTime) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Past => event.is_past(now),
            FilterMode::Upcoming => !event.is_past(now),
        }
    }

    /// Label used by the front-end buttons / menu.
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All Events",
            FilterMode::Past => "Past Events",
            FilterMode::Upcoming => "Upcoming Events",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Past => write!(f, "past"),
            FilterMode::Upcoming => write!(f, "upcoming"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "past" => Ok(FilterMode::Past),
            "upcoming" => Ok(FilterMode::Upcoming),
            other => Err(format!(
                "Invalid filter '{}'. Expected one of: all, past, upcoming",
                other
            )),
        }
    }
}

/// Events visible under `mode` at `now`, in their original order.
pub fn filter<'a, I>(events: I, mode: FilterMode, now: NaiveDateTime) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| mode.matches(event, now))
        .collect()
}
