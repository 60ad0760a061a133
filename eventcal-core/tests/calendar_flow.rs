use chrono::{NaiveDate, NaiveDateTime};
use eventcal_core::{
    Cell, Event, EventStore, FilterMode, MonthView, build_grid, days_in_month, first_weekday_offset,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn february_2024_has_29_days() {
    assert_eq!(days_in_month(2024, 1).unwrap(), 29);
}

#[test]
fn morning_event_is_past_at_noon_but_still_on_its_day() {
    let mut store = EventStore::new();
    let id = store.add("Dentist", Some("Main St"), at(2024, 3, 10, 9)).unwrap().id;
    let now = at(2024, 3, 10, 12);

    let past = store.visible(FilterMode::Past, now);
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].id, id);
    assert!(store.visible(FilterMode::Upcoming, now).is_empty());

    let cells = build_grid(2024, 2, store.events(), now).unwrap();
    let tenth = cells
        .iter()
        .filter_map(Cell::as_day)
        .find(|d| d.day == 10)
        .unwrap();
    assert_eq!(tenth.events.len(), 1);
    assert_eq!(tenth.events[0].id, id);
}

#[test]
fn upcoming_event_can_sit_in_a_past_day() {
    let mut store = EventStore::new();
    store.add("Late dinner", None, at(2024, 3, 10, 21));
    let now = at(2024, 3, 10, 12);

    let visible = store.visible(FilterMode::Upcoming, now);
    let cells = build_grid(2024, 2, visible, now).unwrap();
    let tenth = cells
        .iter()
        .filter_map(Cell::as_day)
        .find(|d| d.day == 10)
        .unwrap();

    assert!(tenth.is_past);
    assert_eq!(tenth.events.len(), 1);
}

#[test]
fn grid_shows_only_filtered_events() {
    let mut store = EventStore::new();
    store.add("Breakfast", None, at(2024, 3, 10, 8));
    store.add("Dinner", None, at(2024, 3, 10, 19));
    store.add("Tomorrow", None, at(2024, 3, 11, 8));
    let now = at(2024, 3, 10, 12);

    let view = MonthView::containing(now);
    let cells = view.grid(store.visible(FilterMode::Past, now), now).unwrap();
    let shown: Vec<&str> = cells
        .iter()
        .filter_map(Cell::as_day)
        .flat_map(|d| d.events.iter().map(|e| e.title.as_str()))
        .collect();

    assert_eq!(shown, vec!["Breakfast"]);
}

#[test]
fn grid_size_matches_offset_plus_days_for_every_month() {
    let now = at(2024, 6, 1, 0);
    for year in [1999, 2000, 2023, 2024, 2100] {
        for month in 0..12 {
            let offset = first_weekday_offset(year, month).unwrap() as usize;
            let days = days_in_month(year, month).unwrap() as usize;
            let cells = build_grid(year, month, Vec::<&Event>::new(), now).unwrap();

            assert_eq!(cells.len(), offset + days, "{year}-{month}");
            assert!(cells[..offset].iter().all(|c| matches!(c, Cell::Empty)));
            assert!(cells[offset..].iter().all(|c| c.as_day().is_some()));
        }
    }
}

#[test]
fn edit_then_delete_round() {
    let mut store = EventStore::new();
    let id = store.add("Standup", None, at(2024, 3, 10, 9)).unwrap().id;
    store.add("   ", None, at(2024, 3, 10, 9));
    assert_eq!(store.len(), 1);

    assert!(store.update(id, "Daily standup", Some("Zoom")));
    assert_eq!(store.get(id).unwrap().to_string(), "Daily standup @ Zoom");

    assert!(store.remove(id).is_some());
    assert!(store.remove(id).is_none());
    assert!(store.is_empty());
}

#[test]
fn grid_serializes_to_json() {
    let mut store = EventStore::new();
    store.add("Standup", None, at(2024, 3, 1, 9));
    let cells = build_grid(2024, 2, store.events(), at(2024, 3, 1, 12)).unwrap();

    let json = serde_json::to_value(&cells).unwrap();
    assert_eq!(json[0]["kind"], "empty");
    assert_eq!(json[5]["kind"], "day");
    assert_eq!(json[5]["day"], 1);
    assert_eq!(json[5]["is_past"], true);
    assert_eq!(json[5]["events"][0]["title"], "Standup");
}
