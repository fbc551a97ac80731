//! Closed-schema validation of raw tool parameters.
//!
//! Each field has its own pure rule function returning either the normalized
//! value or a rule message. [`ParameterValidator::validate`] checks the object
//! shape and unknown fields first, then runs the field rules in declaration
//! order and stops at the first failure.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::query::{Property, QueryParameters, Region, Timeframe, MAX_KEYWORDS, TOPIC_ID_PREFIX};

/// Parameter names accepted by both operations.
pub mod fields {
    pub const KEYWORDS: &str = "keywords";
    pub const CATEGORY: &str = "category";
    pub const REGION: &str = "region";
    pub const TIMEZONE_OFFSET: &str = "timezoneOffsetMinutes";
    pub const TIMEFRAME: &str = "timeframe";
    pub const SCOPE: &str = "scope";

    pub const ALL: [&str; 6] = [KEYWORDS, CATEGORY, REGION, TIMEZONE_OFFSET, TIMEFRAME, SCOPE];
}

pub const MIN_TIMEZONE_OFFSET: i64 = -720;
pub const MAX_TIMEZONE_OFFSET: i64 = 840;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static TOPIC_ID: LazyLock<Regex> = LazyLock::new(|| pattern(r"^/m/[A-Za-z0-9_-]+$"));
static COUNTRY: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Z]{2}$"));
static SUBREGION: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Z]{2}-[A-Z]{2,5}$"));
static DATE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}) ([0-9]{4}-[0-9]{2}-[0-9]{2})$"));
static HOUR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}) ([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2})$")
});
static TODAY_MONTHS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^today ([0-9]+)-m$"));
static NOW_DAYS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^now ([0-9]+)-d$"));
static NOW_HOURS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^now ([0-9]+)-H$"));

/// Turns an untrusted JSON parameter bundle into [`QueryParameters`].
pub struct ParameterValidator;

impl ParameterValidator {
    pub fn validate(raw: &Value) -> Result<QueryParameters, ValidationError> {
        let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;
        reject_unknown_fields(object)?;

        let keywords = {
            let value = present(object, fields::KEYWORDS)
                .ok_or(ValidationError::Missing { field: fields::KEYWORDS })?;
            let items = string_list(fields::KEYWORDS, value)?;
            normalize_keywords(&items).map_err(|m| ValidationError::rule(fields::KEYWORDS, m))?
        };

        let category = match present(object, fields::CATEGORY) {
            Some(value) => Some(
                check_category(integer(fields::CATEGORY, value)?)
                    .map_err(|m| ValidationError::rule(fields::CATEGORY, m))?,
            ),
            None => None,
        };

        let region = match present(object, fields::REGION) {
            Some(value) => Some(
                check_region(string(fields::REGION, value)?)
                    .map_err(|m| ValidationError::rule(fields::REGION, m))?,
            ),
            None => None,
        };

        let timezone_offset_minutes = match object.get(fields::TIMEZONE_OFFSET) {
            Some(value) => check_timezone_offset(integer(fields::TIMEZONE_OFFSET, value)?)
                .map_err(|m| ValidationError::rule(fields::TIMEZONE_OFFSET, m))?,
            None => 0,
        };

        let timeframe = match object.get(fields::TIMEFRAME) {
            Some(value) => parse_timeframe(string(fields::TIMEFRAME, value)?)
                .map_err(|m| ValidationError::rule(fields::TIMEFRAME, m))?,
            None => Timeframe::default(),
        };

        let property = match object.get(fields::SCOPE) {
            Some(value) => check_scope(string(fields::SCOPE, value)?)
                .map_err(|m| ValidationError::rule(fields::SCOPE, m))?,
            None => Property::default(),
        };

        Ok(QueryParameters {
            keywords,
            category,
            region,
            timezone_offset_minutes,
            timeframe,
            property,
        })
    }
}

fn reject_unknown_fields(object: &Map<String, Value>) -> Result<(), ValidationError> {
    match object.keys().find(|k| !fields::ALL.contains(&k.as_str())) {
        Some(unknown) => Err(ValidationError::UnknownField(unknown.clone())),
        None => Ok(()),
    }
}

/// A value for an optional field; explicit `null` counts as absent.
fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn string<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or(ValidationError::InvalidType {
        field,
        expected: "a string",
    })
}

fn integer(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    value.as_i64().ok_or(ValidationError::InvalidType {
        field,
        expected: "an integer",
    })
}

fn string_list<'a>(field: &'static str, value: &'a Value) -> Result<Vec<&'a str>, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field,
        expected: "a list of strings",
    };
    let items = value.as_array().ok_or_else(|| invalid.clone())?;
    items
        .iter()
        .map(|item| item.as_str().ok_or_else(|| invalid.clone()))
        .collect()
}

/// Trim, check and dedup keywords, keeping first-seen order.
///
/// The 1..=5 bound applies to the list as supplied. Dedup never empties a
/// non-empty list, so the lower bound is not checked again afterwards.
pub fn normalize_keywords(raw: &[&str]) -> Result<Vec<String>, String> {
    if raw.is_empty() {
        return Err("at least 1 keyword is required".to_string());
    }
    if raw.len() > MAX_KEYWORDS {
        return Err(format!(
            "at most {MAX_KEYWORDS} keywords are allowed, got {}",
            raw.len()
        ));
    }

    let mut seen = HashSet::new();
    let mut keywords = Vec::with_capacity(raw.len());
    for entry in raw {
        let keyword = entry.trim();
        if keyword.is_empty() {
            return Err("Keywords must be non-empty strings".to_string());
        }
        if keyword.starts_with(TOPIC_ID_PREFIX) && !TOPIC_ID.is_match(keyword) {
            return Err(format!("Invalid Google Trends topic ID: {keyword}"));
        }
        if seen.insert(keyword) {
            keywords.push(keyword.to_string());
        }
    }
    Ok(keywords)
}

pub fn check_category(value: i64) -> Result<u64, String> {
    u64::try_from(value).map_err(|_| "Category ID must be a non-negative integer".to_string())
}

pub fn check_region(value: &str) -> Result<Region, String> {
    if COUNTRY.is_match(value) || SUBREGION.is_match(value) {
        Ok(Region(value.to_string()))
    } else {
        Err("Invalid geo format. Use 'US' or country-region format like 'US-AL' or 'GB-ENG'."
            .to_string())
    }
}

pub fn check_timezone_offset(value: i64) -> Result<i32, String> {
    if value % 15 != 0 {
        return Err("Timezone offset must be a multiple of 15 minutes".to_string());
    }
    if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&value) {
        return Err(format!(
            "Timezone offset must be between {MIN_TIMEZONE_OFFSET} and +{MAX_TIMEZONE_OFFSET} minutes"
        ));
    }
    Ok(value as i32)
}

/// Parse a relative-form count; values that overflow are simply unsupported.
fn relative_count(captures: &regex::Captures<'_>, allowed: &[u8]) -> Option<u8> {
    captures[1]
        .parse::<u8>()
        .ok()
        .filter(|n| allowed.contains(n))
}

pub fn parse_timeframe(value: &str) -> Result<Timeframe, String> {
    let value = value.trim();

    match value {
        "today 5-y" => return Ok(Timeframe::TrailingFiveYears),
        "all" => return Ok(Timeframe::All),
        _ => {}
    }

    if let Some(c) = DATE_RANGE.captures(value) {
        return Ok(Timeframe::DateRange {
            start: c[1].to_string(),
            end: c[2].to_string(),
        });
    }

    if let Some(c) = HOUR_RANGE.captures(value) {
        return Ok(Timeframe::HourRange {
            start: c[1].to_string(),
            end: c[2].to_string(),
        });
    }

    if let Some(c) = TODAY_MONTHS.captures(value) {
        return relative_count(&c, &[1, 3, 12])
            .map(Timeframe::TodayMonths)
            .ok_or_else(|| "today #-m supports only 1, 3, or 12 months".to_string());
    }

    if let Some(c) = NOW_DAYS.captures(value) {
        return relative_count(&c, &[1, 7])
            .map(Timeframe::NowDays)
            .ok_or_else(|| "now #-d supports only 1 or 7 days".to_string());
    }

    if let Some(c) = NOW_HOURS.captures(value) {
        return relative_count(&c, &[1, 4])
            .map(Timeframe::NowHours)
            .ok_or_else(|| "now #-H supports only 1 or 4 hours".to_string());
    }

    Err("Invalid timeframe format for Google Trends".to_string())
}

pub fn check_scope(value: &str) -> Result<Property, String> {
    Property::parse(value).ok_or_else(|| {
        format!("unsupported scope '{value}'; use '', 'images', 'news', 'video' or 'shopping'")
    })
}
