//! Day-of-year calculation
//!
//! Downstream angle derivation expects the ordinal day as exactly three
//! digits, so January 2nd is `"002"`.

use chrono::{Datelike, NaiveDate};

use crate::errors::{ToolError, ToolResult};

/// Zero-padded three-digit ordinal day for a calendar date
pub fn day_of_year(year: i32, month: u32, day: u32) -> ToolResult<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ToolError::InvalidDate { year, month, day })?;
    Ok(format!("{:03}", date.ordinal()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(day_of_year(2019, 1, 2).unwrap(), "002");
        assert_eq!(day_of_year(2019, 4, 10).unwrap(), "100");
        assert_eq!(day_of_year(2019, 9, 10).unwrap(), "253");
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(day_of_year(2019, 12, 31).unwrap(), "365");
        assert_eq!(day_of_year(2020, 12, 31).unwrap(), "366");
        assert_eq!(day_of_year(2020, 3, 1).unwrap(), "061");
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(
            day_of_year(2019, 2, 29),
            Err(ToolError::InvalidDate { .. })
        ));
        assert!(day_of_year(2019, 13, 1).is_err());
        assert!(day_of_year(2019, 0, 1).is_err());
    }
}
