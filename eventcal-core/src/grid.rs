//! Month grid building.
//!
//! Months are 0-based here (0 = January). Grids are Sunday-first: the first
//! `first_weekday_offset` cells are blanks so day 1 lands under its weekday.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{EventCalError, EventCalResult};
use crate::event::Event;

pub const DAYS_PER_WEEK: usize = 7;

pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First day of a 0-based month. Rejects months outside 0..=11 and years
/// chrono cannot represent.
pub fn first_of_month(year: i32, month: u32) -> EventCalResult<NaiveDate> {
    if month > 11 {
        return Err(EventCalError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(EventCalError::InvalidYear(year))
}

/// Number of days in a 0-based month (day 0 of the following month).
pub fn days_in_month(year: i32, month: u32) -> EventCalResult<u32> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = if month == 11 { (year + 1, 0) } else { (year, month + 1) };

    let last = first_of_month(next_year, next_month)
        .ok()
        .and_then(|next| next.pred_opt())
        .ok_or(EventCalError::InvalidYear(year))?;

    debug_assert_eq!(last.month(), first.month());
    Ok(last.day())
}

/// Weekday of day 1, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_offset(year: i32, month: u32) -> EventCalResult<u32> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

/// One slot of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell<'a> {
    /// Leading blank before day 1
    Empty,
    Day(DayCell<'a>),
}

impl<'a> Cell<'a> {
    pub fn as_day(&self) -> Option<&DayCell<'a>> {
        match self {
            Cell::Empty => None,
            Cell::Day(day) => Some(day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a> {
    pub day: u32,
    pub date: NaiveDate,
    /// Midnight of this day is before now.
    pub is_past: bool,
    pub events: Vec<&'a Event>,
}

/// Build the grid for a 0-based month.
///
/// Events are bucketed by the calendar date of their start, regardless of
/// time of day, and ordered by start within a day (ties keep input order).
/// Pass the already-filtered subset to show only visible events.
pub fn build_grid<'a, I>(
    year: i32,
    month: u32,
    events: I,
    now: NaiveDateTime,
) -> EventCalResult<Vec<Cell<'a>>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let first = first_of_month(year, month)?;
    let offset = first_weekday_offset(year, month)? as usize;
    let days = days_in_month(year, month)?;
    let mut events: Vec<&Event> = events.into_iter().collect();
    events.sort_by_key(|e| e.start);

    let mut cells = Vec::with_capacity(offset + days as usize);
    cells.extend(std::iter::repeat_n(Cell::Empty, offset));

    for date in first.iter_days().take(days as usize) {
        cells.push(Cell::Day(DayCell {
            day: date.day(),
            date,
            is_past: date.and_time(NaiveTime::MIN) < now,
            events: events.iter().copied().filter(|e| e.falls_on(date)).collect(),
        }));
    }

    Ok(cells)
}

/// Rows of seven cells; the last row may be short.
pub fn weeks<'c, 'a>(cells: &'c [Cell<'a>]) -> impl Iterator<Item = &'c [Cell<'a>]> {
    cells.chunks(DAYS_PER_WEEK)
}

/// The month currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthView {
    year: i32,
    month: u32,
}

impl MonthView {
    /// Validated 0-based month view.
    pub fn new(year: i32, month: u32) -> EventCalResult<Self> {
        first_of_month(year, month)?;
        Ok(MonthView { year, month })
    }

    /// The month `now` falls in.
    pub fn containing(now: NaiveDateTime) -> Self {
        MonthView {
            year: now.year(),
            month: now.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> EventCalResult<Self> {
        if self.month == 11 {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(&self) -> EventCalResult<Self> {
        if self.month == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn first_day(&self) -> EventCalResult<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    pub fn days(&self) -> EventCalResult<u32> {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// "March 2024"
    pub fn label(&self) -> String {
        match self.first_day() {
            Ok(first) => first.format("%B %Y").to_string(),
            Err(_) => format!("{}-{:02}", self.year, self.month + 1),
        }
    }

    pub fn grid<'a, I>(&self, events: I, now: NaiveDateTime) -> EventCalResult<Vec<Cell<'a>>>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        build_grid(self.year, self.month, events, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn days_in_month_lengths() {
        assert_eq!(days_in_month(2024, 0).unwrap(), 31);
        assert_eq!(days_in_month(2024, 1).unwrap(), 29);
        assert_eq!(days_in_month(2023, 1).unwrap(), 28);
        assert_eq!(days_in_month(1900, 1).unwrap(), 28);
        assert_eq!(days_in_month(2000, 1).unwrap(), 29);
        assert_eq!(days_in_month(2024, 3).unwrap(), 30);
        assert_eq!(days_in_month(2024, 11).unwrap(), 31);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(days_in_month(2024, 12), Err(EventCalError::InvalidMonth(12))));
        assert!(matches!(first_weekday_offset(2024, 99), Err(EventCalError::InvalidMonth(99))));
        assert!(build_grid(2024, 12, Vec::<&Event>::new(), at(2024, 1, 1, 0)).is_err());
    }

    #[test]
    fn invalid_year_is_rejected() {
        assert!(matches!(
            first_of_month(i32::MAX, 0),
            Err(EventCalError::InvalidYear(_))
        ));
    }

    #[test]
    fn first_weekday_offsets() {
        // 2024-03-01 is a Friday
        assert_eq!(first_weekday_offset(2024, 2).unwrap(), 5);
        // 2023-01-01 is a Sunday
        assert_eq!(first_weekday_offset(2023, 0).unwrap(), 0);
        // 2022-10-01 is a Saturday
        assert_eq!(first_weekday_offset(2022, 9).unwrap(), 6);
    }

    #[test]
    fn grid_has_leading_blanks_then_days() {
        let cells = build_grid(2024, 2, Vec::<&Event>::new(), at(2024, 3, 15, 12)).unwrap();
        assert_eq!(cells.len(), 5 + 31);
        assert!(cells[..5].iter().all(|c| *c == Cell::Empty));

        let days: Vec<u32> = cells.iter().filter_map(|c| c.as_day()).map(|d| d.day).collect();
        assert_eq!(days, (1..=31).collect::<Vec<_>>());
    }

    #[test]
    fn is_past_compares_midnight() {
        let cells = build_grid(2024, 2, Vec::<&Event>::new(), at(2024, 3, 10, 12)).unwrap();
        let day = |n: u32| cells.iter().filter_map(|c| c.as_day()).find(|d| d.day == n).unwrap();

        assert!(day(9).is_past);
        // midnight of today is already before noon
        assert!(day(10).is_past);
        assert!(!day(11).is_past);
    }

    #[test]
    fn events_bucket_by_calendar_date() {
        let morning = Event::new("Standup", None, at(2024, 3, 10, 9)).unwrap();
        let evening = Event::new("Dinner", None, at(2024, 3, 10, 19)).unwrap();
        let other_month = Event::new("Trip", None, at(2024, 4, 10, 9)).unwrap();
        let events = vec![morning.clone(), evening.clone(), other_month];

        let cells = build_grid(2024, 2, &events, at(2024, 3, 10, 12)).unwrap();
        let total: usize = cells
            .iter()
            .filter_map(|c| c.as_day())
            .map(|d| d.events.len())
            .sum();
        assert_eq!(total, 2);

        let tenth = cells.iter().filter_map(|c| c.as_day()).find(|d| d.day == 10).unwrap();
        assert_eq!(tenth.events, vec![&morning, &evening]);
    }

    #[test]
    fn day_events_are_ordered_by_start() {
        let dinner = Event::new("Dinner", None, at(2024, 3, 10, 19)).unwrap();
        let lunch = Event::new("Lunch", None, at(2024, 3, 10, 12)).unwrap();
        let call = Event::new("Call", None, at(2024, 3, 10, 12)).unwrap();
        let events = vec![dinner.clone(), lunch.clone(), call.clone()];

        let cells = build_grid(2024, 2, &events, at(2024, 3, 1, 0)).unwrap();
        let tenth = cells.iter().filter_map(|c| c.as_day()).find(|d| d.day == 10).unwrap();
        assert_eq!(tenth.events, vec![&lunch, &call, &dinner]);
    }

    #[test]
    fn weeks_chunks_by_seven() {
        let cells = build_grid(2024, 2, Vec::<&Event>::new(), at(2024, 3, 1, 0)).unwrap();
        let rows: Vec<_> = weeks(&cells).collect();
        assert_eq!(rows.len(), 6);
        assert!(rows[..5].iter().all(|r| r.len() == 7));
        assert_eq!(rows[5].len(), 1);
    }

    #[test]
    fn month_view_navigation_wraps_years() {
        let dec = MonthView::new(2024, 11).unwrap();
        let jan = dec.next().unwrap();
        assert_eq!((jan.year(), jan.month()), (2025, 0));
        assert_eq!(jan.prev().unwrap(), dec);

        let mar = MonthView::new(2024, 2).unwrap();
        assert_eq!(mar.next().unwrap().month(), 3);
        assert_eq!(mar.prev().unwrap().month(), 1);
    }

    #[test]
    fn month_view_rejects_invalid_month() {
        assert!(MonthView::new(2024, 12).is_err());
    }

    #[test]
    fn month_view_containing_now() {
        let view = MonthView::containing(at(2024, 3, 10, 12));
        assert_eq!((view.year(), view.month()), (2024, 2));
        assert_eq!(view.label(), "March 2024");
        assert!(view.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!view.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }
}
