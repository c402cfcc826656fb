/// Utilities for date and time conversion
///
/// Dates travel as ISO-8601 strings (URL, API) and are handled as
/// `DateTime<Utc>` everywhere else.
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Format a calendar date the way the API and the URL expect it
/// Example: 2017-01-01 00:00:00 UTC -> "2017-01-01T00:00:00.000Z"
pub fn to_iso_string(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 datetime, or a bare `yyyy-mm-dd` date taken as UTC midnight
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2017-03-15" or "2017-03-15T14:02:26.123Z" -> "15/03/2017"
pub fn format_date_br(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Value for an `<input type="date">`
pub fn format_date_input(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d").to_string()
}

/// First instant of the day picked in an `<input type="date">`
pub fn parse_date_input_start(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Last millisecond of the day picked in an `<input type="date">`
pub fn parse_date_input_end(value: &str) -> Option<DateTime<Utc>> {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(end_of_day).and_utc())
}
