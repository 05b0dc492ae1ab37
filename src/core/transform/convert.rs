//! Field value conversions applied at output time
//!
//! Conversions never fail: a value that can't be converted is passed through
//! unchanged.

use chrono::{Datelike, NaiveDate};

/// Date format used by the source extracts, e.g. `04-FEB-14`
const SOURCE_DATE_FORMAT: &str = "%d-%b-%y";

/// Date format written to output, e.g. `2014-02-04`
const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// First parsed year that belongs to the previous century
///
/// chrono reads `69` as 2069; the extracts use the POSIX pivot (69-99 is 19xx).
const CENTURY_PIVOT_YEAR: i32 = 2069;

/// Converts a `DD-MMM-YY` date to ISO 8601
///
/// Month names are matched case-insensitively. Two-digit years 00-68 map to
/// 2000-2068 and 69-99 to 1969-1999.
///
/// # Examples
///
/// ```
/// use vigil::core::transform::convert_date;
///
/// assert_eq!(convert_date("04-FEB-14"), "2014-02-04");
/// assert_eq!(convert_date("01-JAN-69"), "1969-01-01");
/// assert_eq!(convert_date("not-a-date"), "not-a-date");
/// ```
pub fn convert_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), SOURCE_DATE_FORMAT) {
        Ok(date) => {
            let date = if date.year() >= CENTURY_PIVOT_YEAR {
                date.with_year(date.year() - 100).unwrap_or(date)
            } else {
                date
            };
            date.format(OUTPUT_DATE_FORMAT).to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Converts a seriousness flag code to `yes`/`no`
///
/// `1` is yes, `2` is no, anything else is returned unchanged.
pub fn convert_yes_no(raw: &str) -> String {
    match raw.trim() {
        "1" => "yes".to_string(),
        "2" => "no".to_string(),
        _ => raw.to_string(),
    }
}

/// Joins a value and its unit with one space, skipping empty parts
///
/// ```
/// use vigil::core::transform::join_value_unit;
///
/// assert_eq!(join_value_unit("500", "mg"), "500 mg");
/// assert_eq!(join_value_unit("500", ""), "500");
/// assert_eq!(join_value_unit("", ""), "");
/// ```
pub fn join_value_unit(value: &str, unit: &str) -> String {
    [value.trim(), unit.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
