//! GS1 element strings, GS1 dates and the Data Matrix request URL.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Result, RxError};

/// Application Identifier for the GTIN.
pub const AI_GTIN: &str = "(01)";
/// Application Identifier for the expiration date.
pub const AI_EXPIRY: &str = "(17)";
/// Application Identifier for the batch/lot number.
pub const AI_LOT: &str = "(10)";
/// Application Identifier for the serial number.
pub const AI_SERIAL: &str = "(21)";

/// Parse a plain calendar date.
///
/// Accepts `YYYY-MM-DD`, or an ISO date-time whose date part is taken as
/// written (no timezone conversion).
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// Encode a date as GS1 `YYMMDD`. Empty or unparseable input gives `""`.
pub fn to_gs1_date(iso_date: &str) -> String {
    match parse_calendar_date(iso_date) {
        Some(date) => format!(
            "{:02}{:02}{:02}",
            date.year().rem_euclid(100),
            date.month(),
            date.day()
        ),
        None => {
            if !iso_date.trim().is_empty() {
                tracing::debug!("Unparseable expiration date '{}', omitting (17)", iso_date);
            }
            String::new()
        }
    }
}

/// Build the human-readable GS1 element string.
///
/// `(01)` is always present. `(17)`, `(10)` and `(21)` follow in that order,
/// each only when its value is non-empty.
pub fn format_element_string(gtin: &str, gs1_date: &str, lot: &str, serial: &str) -> String {
    let mut out = String::with_capacity(18 + gs1_date.len() + lot.len() + serial.len() + 12);
    out.push_str(AI_GTIN);
    out.push_str(gtin);

    for (ai, value) in [(AI_EXPIRY, gs1_date), (AI_LOT, lot), (AI_SERIAL, serial)] {
        if !value.is_empty() {
            out.push_str(ai);
            out.push_str(value);
        }
    }

    out
}

/// Build the Data Matrix image request for an element string.
pub fn data_matrix_url(endpoint: &str, symbology: &str, element_string: &str) -> Result<String> {
    let params = [("bcid", symbology), ("text", element_string)];
    match url::Url::parse_with_params(endpoint, &params) {
        Ok(url) => Ok(url.into()),
        Err(source) => Err(RxError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        }),
    }
}
