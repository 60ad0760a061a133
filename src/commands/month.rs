use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use eventcal_core::{Cell, Event, MonthView};
use serde::Serialize;

use crate::render::{Style, render_month};

/// JSON shape of `eventcal month --json`. `month` is 1-based here.
#[derive(Serialize)]
struct MonthJson<'a> {
    year: i32,
    month: u32,
    label: String,
    cells: &'a [Cell<'a>],
}

pub fn run(view: MonthView, json: bool, style: &Style) -> Result<()> {
    let now = Local::now().naive_local();
    println!("{}", month_output(view, json, style, now)?);
    Ok(())
}

/// The month grid alone; there are no stored events outside a session.
fn month_output(view: MonthView, json: bool, style: &Style, now: NaiveDateTime) -> Result<String> {
    let cells = view.grid(Vec::<&Event>::new(), now)?;

    if json {
        let out = MonthJson {
            year: view.year(),
            month: view.month() + 1,
            label: view.label(),
            cells: &cells,
        };
        Ok(serde_json::to_string_pretty(&out)?)
    } else {
        Ok(render_month(&view, &cells, now.date(), style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PLAIN: Style = Style {
        color: false,
        show_locations: true,
    };

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn json_has_one_based_month_and_all_cells() {
        let view = MonthView::new(2024, 1).unwrap();
        let out = month_output(view, true, &PLAIN, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["year"], 2024);
        assert_eq!(value["month"], 2);
        assert_eq!(value["label"], "February 2024");
        // 2024-02-01 is a Thursday
        assert_eq!(value["cells"].as_array().unwrap().len(), 4 + 29);
        assert_eq!(value["cells"][4]["day"], 1);
        assert_eq!(value["cells"][4]["is_past"], true);
        assert_eq!(value["cells"][32]["is_past"], false);
    }

    #[test]
    fn text_output_is_the_grid() {
        let view = MonthView::new(2024, 1).unwrap();
        let out = month_output(view, false, &PLAIN, now()).unwrap();
        assert!(out.contains("February 2024"));
        assert!(out.trim_end().ends_with("29"));
    }
}
