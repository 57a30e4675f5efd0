//! Age in whole years

use chrono::{Datelike, NaiveDate};

use crate::error::{ProjectionError, Result};

/// Date format accepted by [`parse_date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole years elapsed between `birth_date` and `today`.
///
/// The count drops by one when today's (month, day) falls before the birthday's
/// (month, day). A birth date after `today` is rejected rather than producing a
/// negative age.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> Result<i32> {
    if birth_date > today {
        log::warn!("birth date {} is after reference date {}", birth_date, today);
        return Err(ProjectionError::invalid_date(
            "birth_date",
            format!("{} is after the reference date {}", birth_date, today),
        ));
    }

    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    Ok(age)
}

/// Parse a `YYYY-MM-DD` date, reporting failures against `field`
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ProjectionError::invalid_date(field, format!("'{}' is not a YYYY-MM-DD date ({})", value, e))
    })
}
