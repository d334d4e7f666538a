//! Date and time normalisation helpers
//!
//! Trip departures, ticket purchases and discount validity windows arrive as
//! strings in a handful of shapes (`2024-05-01`, `2024-05-01T10:30:00Z`,
//! `2024-05-01 10:30`). Filters compare them after reducing to a canonical form.

use chrono::NaiveDate;

/// Strips a time-of-day component separated by `T` or a space.
///
/// # Examples
///
/// ```
/// use pasaje_core::temporal::normalize_date;
///
/// assert_eq!(normalize_date("2024-05-01T10:30:00Z"), "2024-05-01");
/// assert_eq!(normalize_date("2024-05-01 10:30"), "2024-05-01");
/// assert_eq!(normalize_date(" 2024-05-01 "), "2024-05-01");
/// ```
pub fn normalize_date(input: &str) -> &str {
	let trimmed = input.trim();
	match trimmed.find(['T', ' ']) {
		Some(idx) => &trimmed[..idx],
		None => trimmed,
	}
}

/// Parses a date from any of the accepted shapes.
///
/// Returns `None` when the input is not a recognisable date; callers decide
/// whether that excludes a row or leaves a bound open.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
	let date = normalize_date(input);
	if date.is_empty() {
		return None;
	}
	NaiveDate::parse_from_str(date, "%Y-%m-%d")
		.or_else(|_| NaiveDate::parse_from_str(date, "%d/%m/%Y"))
		.ok()
}

/// Reduces a time (or datetime) string to `HH:MM`.
///
/// Input that does not look like a time is returned trimmed but otherwise
/// unchanged, so equality against it simply fails.
///
/// # Examples
///
/// ```
/// use pasaje_core::temporal::normalize_time;
///
/// assert_eq!(normalize_time("08:05:00"), "08:05");
/// assert_eq!(normalize_time("8:05"), "08:05");
/// assert_eq!(normalize_time("2024-05-01T21:40:00"), "21:40");
/// assert_eq!(normalize_time("noche"), "noche");
/// ```
pub fn normalize_time(input: &str) -> String {
	let trimmed = input.trim();
	let time = match trimmed.rfind(['T', ' ']) {
		Some(idx) => &trimmed[idx + 1..],
		None => trimmed,
	};
	let mut parts = time.split(':');
	let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
	let minutes = parts
		.next()
		.and_then(|m| m.get(..2).unwrap_or(m).parse::<u32>().ok());
	match (hours, minutes) {
		(Some(h), Some(m)) if h < 24 && m < 60 => format!("{h:02}:{m:02}"),
		_ => trimmed.to_string(),
	}
}
