use crate::error::{ExtractionError, Result};
use chrono::{Datelike, NaiveDate};

/// First day of the given month, or `InvalidMonth`.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ExtractionError::InvalidMonth { year, month })
}

/// Number of days in a month of the proleptic Gregorian calendar.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ExtractionError::InvalidMonth { year, month })?;

    Ok(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn thirty_and_thirty_one_day_months() {
        assert_eq!(days_in_month(2025, 1).unwrap(), 31);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(matches!(
            days_in_month(2025, 0),
            Err(ExtractionError::InvalidMonth { year: 2025, month: 0 })
        ));
        assert!(days_in_month(2025, 13).is_err());
    }
}
