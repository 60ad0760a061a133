//! Terminal rendering for eventcal-core types.
//!
//! Everything here returns strings so the session loop decides when to print.

use chrono::NaiveDate;
use eventcal_core::grid::{DAYS_PER_WEEK, WEEKDAY_HEADERS, weeks};
use eventcal_core::{Cell, DayCell, Event, FilterMode, MonthView};
use owo_colors::OwoColorize;

/// Width of one grid column, including the event marker.
const CELL_WIDTH: usize = 4;

/// Colors on or off, plus display options from the config.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
    pub show_locations: bool,
}

impl Style {
    fn dimmed(&self, text: &str) -> String {
        if self.color { text.dimmed().to_string() } else { text.to_string() }
    }

    fn bold(&self, text: &str) -> String {
        if self.color { text.bold().to_string() } else { text.to_string() }
    }

    fn today(&self, text: &str) -> String {
        if self.color { text.reversed().to_string() } else { text.to_string() }
    }

    fn upcoming(&self, text: &str) -> String {
        if self.color { text.green().to_string() } else { text.to_string() }
    }
}

/// Extension trait for TUI rendering.
pub trait Render {
    fn render(&self, style: &Style) -> String;
}

impl Render for Event {
    fn render(&self, style: &Style) -> String {
        let label = if style.show_locations {
            self.to_string()
        } else {
            self.title.clone()
        };
        format!(
            "{} {:>11} {}",
            style.dimmed(&format!("[{}]", self.id.short())),
            self.time_label(),
            label
        )
    }
}

impl Render for DayCell<'_> {
    /// Day number plus a `*` marker when the day has events.
    fn render(&self, style: &Style) -> String {
        let marker = if self.events.is_empty() { ' ' } else { '*' };
        let text = format!("{:>3}{}", self.day, marker);
        if self.is_past {
            style.dimmed(&text)
        } else {
            text
        }
    }
}

/// Filter buttons, the active one bracketed.
pub fn render_filter_bar(active: FilterMode, style: &Style) -> String {
    FilterMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                style.bold(&format!("[{}]", mode.label()))
            } else {
                style.dimmed(&format!(" {} ", mode.label()))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Month header, weekday row and day grid.
pub fn render_month(view: &MonthView, cells: &[Cell], today: NaiveDate, style: &Style) -> String {
    let width = CELL_WIDTH * DAYS_PER_WEEK;
    let mut lines = vec![style.bold(&format!("{:^width$}", view.label()))];

    lines.push(
        WEEKDAY_HEADERS
            .iter()
            .map(|d| format!("{:>width$}", d, width = CELL_WIDTH))
            .collect::<String>(),
    );

    for week in weeks(cells) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Cell::Empty => " ".repeat(CELL_WIDTH),
                Cell::Day(day) if day.date == today => {
                    let plain = Style {
                        color: false,
                        ..*style
                    };
                    style.today(&day.render(&plain))
                }
                Cell::Day(day) => day.render(style),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

/// Events of the grid listed under their day.
pub fn render_agenda(cells: &[Cell], style: &Style) -> String {
    let days: Vec<&DayCell> = cells
        .iter()
        .filter_map(Cell::as_day)
        .filter(|d| !d.events.is_empty())
        .collect();

    if days.is_empty() {
        return style.dimmed("No events");
    }

    let mut lines = Vec::new();
    for day in days {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(style.bold(&day.date.format("%a %b %-d").to_string()));
        for event in &day.events {
            let line = format!("  {}", event.render(style));
            lines.push(if day.is_past { style.dimmed(&line) } else { style.upcoming(&line) });
        }
    }

    lines.join("\n")
}

/// One-line label for pick lists.
pub fn event_choice(event: &Event) -> String {
    format!("{} {}  {}", event.start.format("%a %b %-d"), event.time_label(), event)
}
