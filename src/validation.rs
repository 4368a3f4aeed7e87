use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;

/// Slot lengths the scheduling form offers.
pub const ALLOWED_DURATIONS: [u32; 6] = [15, 30, 45, 60, 90, 120];

// The backend expects zero-padded 24h times; chrono alone would accept "9:00".
static HOUR_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("regex compiles"));

pub fn parse_hour(value: &str) -> Option<NaiveTime> {
    if !HOUR_FORMAT.is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn duration_allowed(minutes: u32) -> bool {
    ALLOWED_DURATIONS.contains(&minutes)
}

pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{field} is required")))
}

pub fn validate_required_text(field: &'static str, value: Option<&str>) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::BadRequest(format!("{field} is required"))),
    }
}

pub fn validate_hour(field: &'static str, value: &str) -> Result<NaiveTime, ApiError> {
    parse_hour(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{field} must be HH:MM, got {value:?}")))
}

pub fn validate_time_range(start: &str, end: &str) -> Result<(NaiveTime, NaiveTime), ApiError> {
    let start_time = validate_hour("hourStart", start)?;
    let end_time = validate_hour("hourEnd", end)?;
    if end_time <= start_time {
        return Err(ApiError::BadRequest(
            "hourEnd must be after hourStart".into(),
        ));
    }
    Ok((start_time, end_time))
}

/// Record ids travel as a single path segment of the upstream URL. The
/// router hands them over percent-decoded, so anything that would
/// restructure that URL is refused here.
pub fn validate_record_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() || id.contains(['/', '\\', '?', '#']) {
        return Err(ApiError::BadRequest(
            "id contains unsupported characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_capacity(spots: u32) -> Result<u32, ApiError> {
    if spots == 0 {
        return Err(ApiError::BadRequest(
            "capacity must be greater than zero".into(),
        ));
    }
    Ok(spots)
}

pub fn validate_price(price: f64) -> Result<f64, ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::BadRequest("price must be zero or positive".into()));
    }
    Ok(price)
}
