//! Interactive session: render the month, ask what to do, repeat.
//!
//! Events live only as long as the session.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use dialoguer::{Confirm, Input, Select};
use eventcal_core::{Event, EventCalError, EventStore, FilterMode, MonthView};
use owo_colors::OwoColorize;

use crate::render::{Style, event_choice, render_agenda, render_filter_bar, render_month};
use crate::when;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Edit,
    Delete,
    Filter,
    Previous,
    Next,
    Today,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Add => "Add event",
            Action::Edit => "Edit event",
            Action::Delete => "Delete event",
            Action::Filter => "Change filter",
            Action::Previous => "Previous month",
            Action::Next => "Next month",
            Action::Today => "Today",
            Action::Quit => "Quit",
        }
    }
}

const TYPE_ID: &str = "Type an event id";

pub struct Session {
    store: EventStore,
    view: MonthView,
    filter: FilterMode,
    style: Style,
}

impl Session {
    pub fn new(view: MonthView, filter: FilterMode, style: Style) -> Self {
        Session {
            store: EventStore::new(),
            view,
            filter,
            style,
        }
    }

    /// Filter bar, month grid and the visible events of the month.
    fn render(&self, now: NaiveDateTime) -> Result<String> {
        let cells = self.view.grid(self.store.visible(self.filter, now), now)?;

        Ok(format!(
            "{}\n\n{}\n\n{}",
            render_filter_bar(self.filter, &self.style),
            render_month(&self.view, &cells, now.date(), &self.style),
            render_agenda(&cells, &self.style)
        ))
    }

    /// Visible events of the displayed month, earliest first. Same order as
    /// the agenda, since grid days are ordered by start too.
    fn events_in_view(&self, now: NaiveDateTime) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .store
            .visible(self.filter, now)
            .into_iter()
            .filter(|e| self.view.contains(e.date()))
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    fn menu(&self, now: NaiveDateTime) -> Vec<Action> {
        let mut menu = vec![Action::Add];
        if !self.events_in_view(now).is_empty() {
            menu.extend([Action::Edit, Action::Delete]);
        }
        menu.extend([
            Action::Filter,
            Action::Previous,
            Action::Next,
            Action::Today,
            Action::Quit,
        ]);
        menu
    }

    fn navigate(&mut self, action: Action, now: NaiveDateTime) -> Result<()> {
        self.view = match action {
            Action::Previous => self.view.prev()?,
            Action::Next => self.view.next()?,
            Action::Today => MonthView::containing(now),
            _ => return Ok(()),
        };
        log::debug!("showing {}", self.view.label());
        Ok(())
    }

    fn add_event(&mut self) -> Result<()> {
        let view = self.view;
        let start = prompt_with_retry("  When? (day of month, or e.g. \"tomorrow 3pm\")", |input| {
            when::parse_when(input, &view)
        })?;
        let end = prompt_with_retry("  How long? (skip)", |input| {
            when::parse_end(input, start, &view)
        })?;

        // the dialog stays open until the title is usable
        loop {
            let title = prompt_title(None)?;
            let location = prompt_location(None)?;

            let created = match end {
                Some(end) => self.store.add_slot(&title, Some(location.as_str()), start, end)?,
                None => self.store.add(&title, Some(location.as_str()), start),
            };

            match created {
                Some(event) => {
                    println!("{}", format!("  Created: {}", event.title).green());
                    return Ok(());
                }
                None => eprintln!("  {}", "Title cannot be empty".red()),
            }
        }
    }

    fn edit_event(&mut self, now: NaiveDateTime) -> Result<()> {
        let Some(event) = self.pick_event("  Edit which event?", now)? else {
            return Ok(());
        };

        loop {
            let title = prompt_title(Some(event.title.as_str()))?;
            let location = prompt_location(event.location.as_deref())?;

            if self.store.update(event.id, &title, Some(location.as_str())) {
                println!("{}", format!("  Updated: {}", title.trim()).yellow());
                return Ok(());
            }
            eprintln!("  {}", "Title cannot be empty".red());
        }
    }

    fn delete_event(&mut self, now: NaiveDateTime) -> Result<()> {
        let Some(event) = self.pick_event("  Delete which event?", now)? else {
            return Ok(());
        };

        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete '{}'?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
        if let Some(removed) = self.store.remove(event.id) {
            println!("{}", format!("  Deleted: {}", removed.title).red());
        }
        Ok(())
    }

    fn choose_filter(&mut self) -> Result<()> {
        let labels: Vec<&str> = FilterMode::ALL.iter().map(|m| m.label()).collect();
        let current = FilterMode::ALL
            .iter()
            .position(|m| *m == self.filter)
            .unwrap_or(0);

        if let Some(index) = Select::new()
            .with_prompt("  Show")
            .items(&labels)
            .default(current)
            .interact_opt()?
        {
            self.filter = FilterMode::ALL[index];
            log::debug!("filter set to {}", self.filter);
        }
        Ok(())
    }

    /// Pick one of the visible events of the month, or type the short id
    /// shown in the agenda. `None` on Esc.
    fn pick_event(&self, prompt: &str, now: NaiveDateTime) -> Result<Option<Event>> {
        let events = self.events_in_view(now);
        let mut labels: Vec<String> = events.iter().map(|e| event_choice(e)).collect();
        labels.push(TYPE_ID.to_string());

        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match choice {
            None => Ok(None),
            Some(index) if index < events.len() => Ok(Some(events[index].clone())),
            Some(_) => prompt_with_retry("  Event id", |input| self.event_by_id(input)).map(Some),
        }
    }

    /// Any event in the store by full id or unique short-id prefix.
    fn event_by_id(&self, input: &str) -> Result<Event> {
        let input = input.trim();
        let id = self.store.resolve(input)?;
        let event = self
            .store
            .get(id)
            .ok_or_else(|| EventCalError::EventNotFound(input.to_string()))?;
        Ok(event.clone())
    }

    #[cfg(test)]
    fn id_of(&self, title: &str) -> Option<eventcal_core::EventId> {
        self.store.events().iter().find(|e| e.title == title).map(|e| e.id)
    }
}

pub fn run(mut session: Session) -> Result<()> {
    loop {
        // one reading of the clock per pass, shared by the render and the prompts
        let now = Local::now().naive_local();
        println!("{}\n", session.render(now)?);

        let menu = session.menu(now);
        let labels: Vec<&str> = menu.iter().map(|a| a.label()).collect();
        let Some(choice) = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        match menu[choice] {
            Action::Add => session.add_event()?,
            Action::Edit => session.edit_event(now)?,
            Action::Delete => session.delete_event(now)?,
            Action::Filter => session.choose_filter()?,
            Action::Quit => return Ok(()),
            navigation => session.navigate(navigation, now)?,
        }
        println!();
    }
}

/// Prompt until `parse` accepts the input, printing each parse error.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_title(initial: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt("  Title").allow_empty(true);
    if let Some(title) = initial {
        input = input.with_initial_text(title);
    }
    Ok(input.interact_text()?)
}

fn prompt_location(initial: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt("  Where? (skip)")
        .allow_empty(true);
    if let Some(location) = initial {
        input = input.with_initial_text(location);
    }
    Ok(input.interact_text()?)
}
