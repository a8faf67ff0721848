use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::NumericStats;
use crate::models::CellValue;

const TEMPORAL_KEYWORDS: [&str; 4] = ["date", "time", "month", "year"];

static TEMPORAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // ISO date, optionally with a time part
        r"^\d{4}-\d{1,2}-\d{1,2}(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
        // US date
        r"^\d{1,2}/\d{1,2}/(?:\d{2}|\d{4})$",
        // Clock time
        r"(?i)^\d{1,2}:\d{2}(?::\d{2})?\s?(?:am|pm)?$",
        // Month name alone or followed by a day and/or year: "Mar", "March 2024", "Mar 5, 2024"
        r"(?i)^(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?(?:[\s,-]+\d{1,2}(?:st|nd|rd|th)?)?(?:[\s,-]+\d{2,4})?$",
        // Weekday name alone or followed by something containing a digit
        r"(?i)^(?:mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)\.?(?:[,\s]+[\w\s,:/.-]*\d[\w\s,:/.-]*)?$",
        // Four digit year
        r"^(?:19|20)\d{2}$",
        // Quarter notation: Q1, Q3 2024, 2024-Q2
        r"(?i)^(?:q[1-4](?:[\s/-]*(?:\d{2}|\d{4}))?|\d{4}[\s/-]*q[1-4])$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("temporal pattern must compile"))
    .collect()
});

static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(?:,\d{3})+(?:\.\d+)?$").expect("grouped number pattern must compile")
});

pub fn has_temporal_keyword(column_name: &str) -> bool {
    let lowered = column_name.to_lowercase();
    TEMPORAL_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

pub fn is_date_string(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if TEMPORAL_PATTERNS.iter().any(|re| re.is_match(s)) {
        return true;
    }

    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    let date_formats = ["%Y/%m/%d", "%d.%m.%Y", "%d-%m-%Y"];
    let datetime_formats = ["%Y/%m/%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];
    date_formats
        .iter()
        .any(|format| NaiveDate::parse_from_str(s, format).is_ok())
        || datetime_formats
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
}

/// Numbers typed as text only count as temporal through their string form,
/// so a numeric cell never matches here.
pub fn is_temporal_value(value: &CellValue) -> bool {
    value.as_text().is_some_and(is_date_string)
}

pub fn parse_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = if GROUPED_NUMBER.is_match(s) {
        s.replace(',', "").parse::<f64>().ok()
    } else {
        s.parse::<f64>().ok()
    };
    // "inf" and "NaN" parse as floats but are not data
    parsed.filter(|n| n.is_finite())
}

pub fn numeric_stats(values: &[f64]) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }

    let (min, max, sum) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
    );
    let count = values.len() as f64;
    let mean = sum / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

    Some(NumericStats {
        min,
        max,
        range: max - min,
        mean,
        variance,
    })
}
