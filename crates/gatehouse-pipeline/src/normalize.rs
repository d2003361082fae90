// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field normalizers for model-extracted date and time strings.
//!
//! Every function here is side-effect-free and total: an input either yields
//! a canonical value or `None`, never an error. "Today" is the host-local
//! calendar date; no timezone conversion is performed.

use std::sync::LazyLock;

use chrono::{Days, Local, NaiveDate};
use regex::Regex;

/// Absolute date formats accepted before falling back to relative keywords.
/// ISO first, so canonical values re-normalize to themselves.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}):?(\d{0,2})\s*(am|pm)?").expect("time pattern is valid")
});

/// Normalize a loosely-formatted date string to `YYYY-MM-DD`.
///
/// Tries absolute formats first; on failure recognizes the literal
/// substrings "today"/"tomorrow" (case-insensitive) relative to the current
/// host-local date. Returns `None` for anything else.
pub fn normalize_date(input: &str) -> Option<String> {
    normalize_date_on(input, Local::now().date_naive())
}

/// [`normalize_date`] with an explicit "today" for deterministic tests.
pub fn normalize_date_on(input: &str, today: NaiveDate) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("today") {
        return Some(today.format("%Y-%m-%d").to_string());
    }
    if lower.contains("tomorrow") {
        let tomorrow = today.checked_add_days(Days::new(1))?;
        return Some(tomorrow.format("%Y-%m-%d").to_string());
    }

    None
}

/// Normalize a loosely-formatted time string to 24-hour `HH:MM`.
///
/// Accepts `H[H][:MM] [am|pm]` with optional minutes defaulting to 0.
/// Returns `None` when no digits match or the converted hour/minute fall
/// outside `0..=23` / `0..=59`.
pub fn normalize_time(input: &str) -> Option<String> {
    let captures = TIME_RE.captures(input)?;

    let mut hours: i32 = captures.get(1)?.as_str().parse().ok()?;
    let minutes: i32 = match captures.get(2) {
        Some(m) if !m.as_str().is_empty() => m.as_str().parse().ok()?,
        _ => 0,
    };
    let meridiem = captures
        .get(3)
        .map(|m| m.as_str().to_ascii_lowercase());

    match meridiem.as_deref() {
        Some("pm") if hours != 12 => hours += 12,
        Some("am") if hours == 12 => hours = 0,
        _ => {}
    }

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    Some(format!("{hours:02}:{minutes:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn iso_dates_pass_through_unchanged() {
        assert_eq!(
            normalize_date_on("2026-08-07", fixed_today()).as_deref(),
            Some("2026-08-07")
        );
    }

    #[test]
    fn common_formats_are_canonicalized() {
        for input in ["08/07/2026", "August 7, 2026", "Aug 7 2026", "7 August 2026"] {
            assert_eq!(
                normalize_date_on(input, fixed_today()).as_deref(),
                Some("2026-08-07"),
                "input: {input}"
            );
        }
    }

    #[test]
    fn relative_keywords_resolve_against_today() {
        assert_eq!(
            normalize_date_on("today", fixed_today()).as_deref(),
            Some("2026-08-06")
        );
        assert_eq!(
            normalize_date_on("Tomorrow", fixed_today()).as_deref(),
            Some("2026-08-07")
        );
        // Substring match, as loosely as the model may phrase it.
        assert_eq!(
            normalize_date_on("sometime tomorrow morning", fixed_today()).as_deref(),
            Some("2026-08-07")
        );
    }

    #[test]
    fn garbage_dates_yield_none() {
        for input in ["", "  ", "next Tuesday", "soon", "32/13/2026"] {
            assert_eq!(normalize_date_on(input, fixed_today()), None, "input: {input}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        // Re-normalizing a canonical value returns itself; non-normalizable
        // inputs are stably None.
        for input in ["2026-08-07", "tomorrow", "08/07/2026", "whenever"] {
            let first = normalize_date_on(input, fixed_today());
            match first {
                Some(canonical) => {
                    assert_eq!(
                        normalize_date_on(&canonical, fixed_today()).as_deref(),
                        Some(canonical.as_str())
                    );
                }
                None => assert_eq!(normalize_date_on(input, fixed_today()), None),
            }
        }
    }

    #[test]
    fn twelve_hour_times_convert_to_twenty_four() {
        assert_eq!(normalize_time("2:30 pm").as_deref(), Some("14:30"));
        assert_eq!(normalize_time("2:30PM").as_deref(), Some("14:30"));
        assert_eq!(normalize_time("12:15 am").as_deref(), Some("00:15"));
        assert_eq!(normalize_time("12:00 pm").as_deref(), Some("12:00"));
        assert_eq!(normalize_time("9 am").as_deref(), Some("09:00"));
    }

    #[test]
    fn twenty_four_hour_times_pass_through() {
        assert_eq!(normalize_time("14:30").as_deref(), Some("14:30"));
        assert_eq!(normalize_time("09:05").as_deref(), Some("09:05"));
        assert_eq!(normalize_time("0:00").as_deref(), Some("00:00"));
    }

    #[test]
    fn out_of_range_times_yield_none() {
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time("14:75"), None);
        assert_eq!(normalize_time("13:00 pm"), None); // 13 pm -> 25
        assert_eq!(normalize_time("no time here"), None);
        assert_eq!(normalize_time(""), None);
    }

    #[test]
    fn all_valid_twelve_hour_inputs_stay_in_range() {
        let shape = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
        for h in 1..=12 {
            for mm in [0, 9, 30, 59] {
                for meridiem in ["am", "pm"] {
                    let input = format!("{h}:{mm:02} {meridiem}");
                    let output = normalize_time(&input).unwrap_or_else(|| {
                        panic!("{input} should normalize");
                    });
                    assert!(shape.is_match(&output), "{input} -> {output}");
                }
            }
        }
    }
}
