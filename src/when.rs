//! Parsing of the "When?" and "How long?" prompts.
//!
//! A bare day number picks that day of the displayed month at midnight,
//! like clicking a day cell. Anything else goes through fuzzydate.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use eventcal_core::MonthView;

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("tues", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("thur", "thursday"),
    ("thurs", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Parse the start of a new event.
///
/// Accepts `10`, `10 15:30` (day of `view`, optional time) or natural
/// language such as `tomorrow 3pm`. Inputs without a time mean midnight.
pub fn parse_when(input: &str, view: &MonthView) -> Result<NaiveDateTime> {
    let input = input.trim();
    if let Some(start) = parse_day_of_view(input, view)? {
        return Ok(start);
    }

    let expanded = expand_abbreviations(input);
    let parsed = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(input) {
        Ok(parsed)
    } else {
        Ok(parsed.date().and_time(NaiveTime::MIN))
    }
}

/// Parse the optional end of a new event.
///
/// Blank means no end. Durations (`45m`, `1h 30m`) are added to `start`;
/// otherwise the input is read as a date/time, with an optional
/// `until`/`to` prefix.
pub fn parse_end(
    input: &str,
    start: NaiveDateTime,
    view: &MonthView,
) -> Result<Option<NaiveDateTime>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(std_dur) = humantime::parse_duration(input) {
        let duration = Duration::from_std(std_dur).context("Duration too large")?;
        let end = start
            .checked_add_signed(duration)
            .context("End time out of range")?;
        return Ok(Some(end));
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    let end = parse_when(cleaned, view)?;
    if end < start {
        anyhow::bail!(
            "End {} is before start {}",
            end.format("%Y-%m-%d %H:%M"),
            start.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(Some(end))
}

/// `"10"` or `"10 15:30"` as a date in `view`. `Ok(None)` if the input is
/// not in that shape.
fn parse_day_of_view(input: &str, view: &MonthView) -> Result<Option<NaiveDateTime>> {
    let mut parts = input.split_whitespace();
    let Some(Ok(day)) = parts.next().map(str::parse::<u32>) else {
        return Ok(None);
    };
    let time = match (parts.next(), parts.next()) {
        (None, _) => NaiveTime::MIN,
        (Some(t), None) => match NaiveTime::parse_from_str(t, "%H:%M") {
            Ok(time) => time,
            Err(_) => return Ok(None),
        },
        _ => return Ok(None),
    };

    let days = view.days()?;
    if day == 0 || day > days {
        anyhow::bail!("{} has no day {} (1-{})", view.label(), day, days);
    }

    let date = view.first_day()? + Duration::days(i64::from(day - 1));
    Ok(Some(date.and_time(time)))
}

/// Spell out day and month abbreviations fuzzydate does not know.
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(short, _)| *short == word)
                .map_or(word, |(_, full)| *full)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day (`3pm`, `3 pm`, `15:00`, `at 9`,
/// `noon`, `midnight`).
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let is_number = |w: &str| !w.is_empty() && w.chars().all(|c| c.is_ascii_digit());

    words.iter().enumerate().any(|(i, word)| {
        let previous = i.checked_sub(1).map(|p| words[p]);
        let next = words.get(i + 1).copied();

        match *word {
            "noon" | "midnight" => true,
            "am" | "pm" => previous.is_some_and(is_number),
            "at" => next.is_some_and(|n| n.starts_with(|c: char| c.is_ascii_digit())),
            w if w.ends_with("am") || w.ends_with("pm") => is_number(&w[..w.len() - 2]),
            w => w.split_once(':').is_some_and(|(h, m)| {
                h.ends_with(|c: char| c.is_ascii_digit())
                    && m.starts_with(|c: char| c.is_ascii_digit())
            }),
        }
    })
}
