//! Entry domain model.
//!
//! # Responsibility
//! - Define the persisted shape of one focus session.
//! - Parse raw minute/date input the way the entry form accepts it.
//!
//! # Invariants
//! - `id`, `subject` and `date` never change after creation.
//! - Serialized field names match the persisted/exported JSON layout.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Subject used when the caller leaves the subject blank.
pub const DEFAULT_SUBJECT: &str = "General";

/// Calendar date layout used for `Entry::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded focus session.
///
/// Deserialization is lenient so loosely shaped imported objects load without
/// per-field validation: missing or `null` fields take defaults, non-string
/// scalars are stringified, and numeric `minutes` are truncated (anything
/// that is not a positive number reads as 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque unique identifier, assigned at creation.
    #[serde(default, deserialize_with = "loose_text")]
    pub id: String,
    #[serde(default = "default_subject", deserialize_with = "loose_subject")]
    pub subject: String,
    #[serde(default, deserialize_with = "loose_minutes")]
    pub minutes: u32,
    /// Empty string means "no remark".
    #[serde(default, deserialize_with = "loose_text")]
    pub remarks: String,
    /// `YYYY-MM-DD` calendar date.
    #[serde(default, deserialize_with = "loose_text")]
    pub date: String,
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn loose_subject<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(default_subject()),
        other => Ok(value_to_text(other)),
    }
}

fn loose_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let minutes = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.is_finite() && *value > 0.0)
                    .map(|value| value.trunc() as u32)
            })
            .unwrap_or(0),
        Value::String(text) => parse_minutes(&text).unwrap_or(0),
        _ => 0,
    };
    Ok(minutes)
}

impl Entry {
    /// Builds an entry from already-validated parts.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        minutes: u32,
        remarks: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            minutes,
            remarks: remarks.into(),
            date: format_date(date),
        }
    }

    /// Returns the entry date, or `None` when the stored string is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Returns remarks, or `None` when the remark is empty.
    pub fn remark(&self) -> Option<&str> {
        if self.remarks.is_empty() {
            None
        } else {
            Some(self.remarks.as_str())
        }
    }
}

/// Input validation failures for entry creation and import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Minutes were absent, non-numeric, zero or negative.
    MissingMinutes { raw: String },
    /// An explicitly supplied date is not `YYYY-MM-DD`.
    InvalidDate { raw: String },
    /// Import payload parsed, but its top-level value is not an array.
    ImportNotArray,
    /// Import payload is not JSON.
    ImportMalformed { message: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMinutes { raw } => {
                write!(f, "please enter minutes focused (got `{raw}`)")
            }
            Self::InvalidDate { raw } => write!(f, "date must be YYYY-MM-DD, got `{raw}`"),
            Self::ImportNotArray => write!(f, "import payload must be a JSON array"),
            Self::ImportMalformed { message } => write!(f, "invalid import payload: {message}"),
        }
    }
}

impl Error for ValidationError {}

/// Parses minutes the way the entry form does.
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits is read and the remainder ignored (`"25min"` -> 25,
/// `"3.7"` -> 3). Only positive values that fit in `u32` are returned.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() || negative {
        return None;
    }

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Parses a strict `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_minutes, Entry, DEFAULT_SUBJECT};
    use chrono::NaiveDate;

    #[test]
    fn parse_minutes_reads_integer_prefix() {
        assert_eq!(parse_minutes("25"), Some(25));
        assert_eq!(parse_minutes("  40 "), Some(40));
        assert_eq!(parse_minutes("25min"), Some(25));
        assert_eq!(parse_minutes("3.7"), Some(3));
        assert_eq!(parse_minutes("+15"), Some(15));
    }

    #[test]
    fn parse_minutes_rejects_non_positive_and_garbage() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("   "), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("99999999999"), None);
    }

    #[test]
    fn parse_date_requires_iso_layout() {
        assert_eq!(
            parse_date("2024-01-10"),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
        assert_eq!(parse_date("10/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let entry: Entry = serde_json::from_str(r#"{"id":"x1","minutes":12}"#).unwrap();
        assert_eq!(entry.subject, DEFAULT_SUBJECT);
        assert_eq!(entry.minutes, 12);
        assert!(entry.remark().is_none());
        assert!(entry.parsed_date().is_none());
    }

    #[test]
    fn serialize_uses_persisted_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let entry = Entry::new("e1", "Maths", 25, "integrals", date);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "e1");
        assert_eq!(value["subject"], "Maths");
        assert_eq!(value["minutes"], 25);
        assert_eq!(value["remarks"], "integrals");
        assert_eq!(value["date"], "2024-01-10");
    }

    #[test]
    fn deserialize_accepts_loosely_typed_fields() {
        let entry: Entry = serde_json::from_str(
            r#"{"id":1700000000000,"subject":null,"minutes":25.5,"remarks":null,"date":"2024-01-10"}"#,
        )
        .unwrap();
        assert_eq!(entry.id, "1700000000000");
        assert_eq!(entry.subject, DEFAULT_SUBJECT);
        assert_eq!(entry.minutes, 25);
        assert_eq!(entry.remarks, "");
        assert_eq!(entry.date, "2024-01-10");
    }

    #[test]
    fn deserialize_reads_unusable_minutes_as_zero() {
        for raw in [r#"-4"#, r#""40""#, r#"null"#, r#"true"#, r#"[1]"#] {
            let json = format!(r#"{{"minutes":{raw}}}"#);
            let entry: Entry = serde_json::from_str(&json).unwrap();
            let expected = if raw == r#""40""# { 40 } else { 0 };
            assert_eq!(entry.minutes, expected, "minutes from {raw}");
        }
    }
}
