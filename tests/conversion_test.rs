//! Output value conversions

use test_case::test_case;
use vigil::core::transform::{convert_date, convert_yes_no, join_value_unit};
use vigil::domain::clean_field;

#[test_case("04-FEB-14", "2014-02-04" ; "upper case month")]
#[test_case("29-feb-16", "2016-02-29" ; "leap day")]
#[test_case(" 31-DEC-68 ", "2068-12-31" ; "surrounding whitespace and pivot year")]
#[test_case("01-JAN-69", "1969-01-01" ; "sixty nine is last century")]
#[test_case("01-JAN-70", "1970-01-01" ; "last century")]
#[test_case("not-a-date", "not-a-date" ; "unparseable passes through")]
#[test_case("31-FEB-14", "31-FEB-14" ; "impossible date passes through")]
#[test_case("2014-02-04", "2014-02-04" ; "already iso passes through")]
#[test_case("", "" ; "empty")]
fn test_convert_date(raw: &str, expected: &str) {
    assert_eq!(convert_date(raw), expected);
}

#[test_case("1", "yes" ; "one is yes")]
#[test_case("2", "no" ; "two is no")]
#[test_case(" 1 ", "yes" ; "padded code")]
#[test_case("3", "3" ; "unknown code passes through")]
#[test_case("", "" ; "empty passes through")]
#[test_case("Y", "Y" ; "letter passes through")]
fn test_convert_yes_no(raw: &str, expected: &str) {
    assert_eq!(convert_yes_no(raw), expected);
}

#[test_case("500", "mg", "500 mg" ; "value and unit")]
#[test_case("3", "", "3" ; "value only")]
#[test_case("", "Days", "Days" ; "unit only")]
#[test_case(" 2 ", " Weeks ", "2 Weeks" ; "parts are trimmed")]
fn test_join_value_unit(value: &str, unit: &str, expected: &str) {
    assert_eq!(join_value_unit(value, unit), expected);
}

#[test_case("\"TYLENOL\"", "TYLENOL" ; "quoted")]
#[test_case("  Fever  ", "Fever" ; "padded")]
#[test_case("\"a \\\"b\\\" c\"", "a \"b\" c" ; "escaped inner quotes")]
#[test_case("plain", "plain" ; "unquoted")]
fn test_clean_field(raw: &str, expected: &str) {
    assert_eq!(clean_field(raw), expected);
}
