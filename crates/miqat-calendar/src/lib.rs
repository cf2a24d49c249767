//! Gregorian to Hijri conversion using the mean lunar year.
//!
//! This is an arithmetic approximation, not a sighting calendar: years are
//! 354.367 days on average and months alternate 30/29 days. Results can be a
//! day or two away from the Umm al-Qura calendar.

use chrono::{Datelike, Duration, NaiveDate};
use miqat_types::{CalendarDate, MiqatError};

pub use miqat_types::{hijri_month_name, HIJRI_MONTH_NAMES};

/// Days from 0001-01-01 (day 1) to the Hijri epoch, 16 July 622 (proleptic Gregorian).
pub const HIJRI_EPOCH_DAY: i32 = 227_012;

/// Mean lunar year in thousandths of a day (354.367 days).
pub const MEAN_YEAR_MILLIDAYS: i64 = 354_367;

/// Month lengths of the 354-day cycle.
pub const MONTH_LENGTHS: [i64; 12] = [30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29];

/// Largest accepted moon-sighting adjustment, in days.
pub const MAX_ADJUSTMENT: i64 = 30;

/// First day of the Hijri era (1 Muharram 1 AH).
pub fn hijri_epoch() -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt(HIJRI_EPOCH_DAY).unwrap_or(NaiveDate::MIN)
}

/// Converts a Gregorian date to an approximate Hijri date.
///
/// # Errors
/// Returns `DateBeforeEpoch` for dates before 16 July 622.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_calendar::gregorian_to_hijri;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
/// let hijri = gregorian_to_hijri(date).unwrap();
/// assert_eq!(hijri.to_string(), "3 Ramadhan 1445 AH");
/// ```
pub fn gregorian_to_hijri(date: NaiveDate) -> Result<CalendarDate, MiqatError> {
    let days = i64::from(date.num_days_from_ce() - HIJRI_EPOCH_DAY);
    if days < 0 {
        return Err(MiqatError::DateBeforeEpoch { date, epoch: hijri_epoch() });
    }

    let elapsed_years = days * 1000 / MEAN_YEAR_MILLIDAYS;
    // First whole day whose mean-year index is `elapsed_years`.
    let year_start = (elapsed_years * MEAN_YEAR_MILLIDAYS + 999) / 1000;
    let (month, day) = month_and_day(days - year_start + 1);

    Ok(CalendarDate::new(day, month, elapsed_years as usize + 1))
}

/// Converts with a moon-sighting adjustment.
///
/// # Arguments
/// * `date` - Gregorian date
/// * `adjustment` - Day offset (positive = Hijri ahead), clamped to [-30, 30]
///
/// # Errors
/// Returns `DateBeforeEpoch` (carrying the caller's `date`) if the adjusted
/// date precedes the epoch.
pub fn to_hijri(date: NaiveDate, adjustment: i64) -> Result<CalendarDate, MiqatError> {
    let adjustment = adjustment.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
    let adjusted = date
        .checked_add_signed(Duration::days(adjustment))
        .ok_or_else(|| MiqatError::not_available(date))?;
    gregorian_to_hijri(adjusted).map_err(|e| match e {
        MiqatError::DateBeforeEpoch { epoch, .. } => MiqatError::DateBeforeEpoch { date, epoch },
        other => other,
    })
}

/// Splits a 1-based day of the year into (month, day).
fn month_and_day(day_of_year: i64) -> (usize, usize) {
    let mut day = day_of_year;
    for (i, len) in MONTH_LENGTHS.iter().enumerate() {
        if day <= *len {
            return (i + 1, day as usize);
        }
        day -= len;
    }
    // 355th day of a long year.
    (12, (MONTH_LENGTHS[11] + day) as usize)
}
