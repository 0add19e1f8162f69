//! # Age Calculation
//!
//! Calendar age (years, months, days) between a birth date and "now",
//! plus running totals in days, hours, minutes and seconds.
//!
//! The calendar part borrows from the month preceding `today` when the
//! day-of-month difference is negative. A birth day past the end of that
//! month is capped to its length, so 31 January to 1 March counts as one
//! month and one day.
//!
//! Totals come straight from the elapsed time, so they include the time
//! of day of `now` (birth is taken at midnight).

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Date format accepted by [`AgeInput::from_fields`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input parameters for an age calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    /// Reference instant; `None` means the local clock
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

impl AgeInput {
    /// Parse `YYYY-MM-DD` fields. A blank `as_of` uses the local clock.
    pub fn from_fields(birth_date: &str, as_of: Option<&str>) -> CalcResult<Self> {
        let birth_date = parse_date("birth_date", birth_date)?;
        let as_of = match as_of.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => Some(parse_date("as_of", text)?.and_time(NaiveTime::MIN)),
            None => None,
        };
        Ok(AgeInput { birth_date, as_of })
    }

    fn now(&self) -> NaiveDateTime {
        self.as_of.unwrap_or_else(|| Local::now().naive_local())
    }
}

fn parse_date(field: &str, text: &str) -> CalcResult<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CalcError::incomplete_input(field, "Please select a date"));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CalcError::invalid_input(field, text, "Expected a date as YYYY-MM-DD"))
}

/// Calendar age and elapsed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_hours: i64,
    pub total_minutes: i64,
    pub total_seconds: i64,
}

/// Calculate age as of `input.as_of` (or the local clock).
pub fn calculate(input: &AgeInput) -> CalcResult<AgeResult> {
    calculate_between(input.birth_date, input.now())
}

/// Calculate age between a birth date and an explicit instant.
pub fn calculate_between(birth_date: NaiveDate, now: NaiveDateTime) -> CalcResult<AgeResult> {
    let birth = birth_date.and_time(NaiveTime::MIN);
    let today = now.date();

    if birth > now {
        return Err(CalcError::future_date(birth_date, today));
    }

    let mut years = today.year() - birth_date.year();
    let mut months = today.month() as i32 - birth_date.month() as i32;
    let mut days = today.day() as i32 - birth_date.day() as i32;

    if days < 0 {
        months -= 1;
        let previous_month_len = days_in_previous_month(today)?;
        days = today.day() as i32 + previous_month_len - (birth_date.day() as i32).min(previous_month_len);
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    let elapsed = now - birth;
    let result = AgeResult {
        years,
        months,
        days,
        total_days: elapsed.num_days(),
        total_hours: elapsed.num_hours(),
        total_minutes: elapsed.num_minutes(),
        total_seconds: elapsed.num_seconds(),
    };

    debug!(%birth_date, %today, years, months, days, "age calculated");
    Ok(result)
}

/// Length of the month before the one containing `date`.
fn days_in_previous_month(date: NaiveDate) -> CalcResult<i32> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day() as i32)
        .ok_or_else(|| CalcError::Internal {
            message: format!("no month precedes {date}"),
        })
}
