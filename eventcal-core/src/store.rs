//! In-memory event store.
//!
//! The store is the only owner of events. Everything else borrows from it
//! for the duration of a render.

use chrono::NaiveDateTime;

use crate::error::{EventCalError, EventCalResult};
use crate::event::{Event, EventId, normalize_location, normalize_title};
use crate::filter::{FilterMode, filter};

/// Ordered collection of events, in creation order.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Append a new event. Does nothing and returns `None` if the title is blank.
    pub fn add(
        &mut self,
        title: &str,
        location: Option<&str>,
        start: NaiveDateTime,
    ) -> Option<&Event> {
        let Some(event) = Event::new(title, location, start) else {
            log::debug!("rejected event with blank title at {}", start);
            return None;
        };
        Some(self.push(event))
    }

    /// Append a new event covering `start..end`.
    ///
    /// A blank title is a no-op (`Ok(None)`); an end before the start is an error.
    pub fn add_slot(
        &mut self,
        title: &str,
        location: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EventCalResult<Option<&Event>> {
        if end < start {
            return Err(EventCalError::InvalidSlot {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let Some(mut event) = Event::new(title, location, start) else {
            log::debug!("rejected slot with blank title at {}", start);
            return Ok(None);
        };
        event.end = Some(end);
        Ok(Some(self.push(event)))
    }

    fn push(&mut self, event: Event) -> &Event {
        log::debug!("added event {} '{}' at {}", event.id.short(), event.title, event.start);
        let index = self.events.len();
        self.events.push(event);
        &self.events[index]
    }

    /// Replace title and location of an event. Start and end never change.
    ///
    /// Returns false (and changes nothing) for an unknown id or a blank title.
    pub fn update(&mut self, id: EventId, title: &str, location: Option<&str>) -> bool {
        let Some(title) = normalize_title(title) else {
            log::debug!("rejected update of {} with blank title", id.short());
            return false;
        };
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            log::debug!("update of unknown event {}", id.short());
            return false;
        };

        event.title = title;
        event.location = normalize_location(location);
        log::debug!("updated event {} '{}'", id.short(), event.title);
        true
    }

    /// Remove an event, returning it. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(index);
        log::debug!("removed event {} '{}'", id.short(), removed.title);
        Some(removed)
    }

    /// Events visible under `mode` at `now`.
    pub fn visible(&self, mode: FilterMode, now: NaiveDateTime) -> Vec<&Event> {
        filter(&self.events, mode, now)
    }

    /// Resolve a full id or a unique short-id prefix.
    pub fn resolve(&self, prefix: &str) -> EventCalResult<EventId> {
        let mut matches = self.events.iter().filter(|e| e.id.matches_prefix(prefix));

        match (matches.next(), matches.next()) {
            (Some(event), None) => Ok(event.id),
            (Some(_), Some(_)) => Err(EventCalError::AmbiguousEventId(prefix.to_string())),
            (None, _) => Err(EventCalError::EventNotFound(prefix.to_string())),
        }
    }
}
