//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use miqat_astronomy::calculate_prayer_times;
use miqat_calendar::{gregorian_to_hijri, to_hijri};
use miqat_types::{CalendarDate, GeoCoordinate, MiqatError, PrayerParams, PrayerTimes};

/// Month number of Ramadhan.
pub const MONTH_RAMADHAN: usize = 9;

/// Extends `NaiveDate` with calendar and prayer-time methods.
pub trait MiqatDateExt {
    /// Approximate Hijri date.
    fn to_hijri(&self) -> Result<CalendarDate, MiqatError>;

    /// Approximate Hijri date shifted by a moon-sighting adjustment.
    fn to_hijri_adjusted(&self, adjustment: i64) -> Result<CalendarDate, MiqatError>;

    /// Prayer times with default angles.
    fn prayer_times(&self, coords: GeoCoordinate) -> PrayerTimes;

    /// Prayer times with custom angles.
    fn prayer_times_with(&self, coords: GeoCoordinate, params: &PrayerParams) -> PrayerTimes;

    /// Finds the next 1st of a Hijri month (up to 31 days ahead).
    fn next_hijri_month_start(&self) -> Option<NaiveDate>;

    /// Finds the next 1 Ramadhan (up to 400 days ahead).
    fn next_ramadhan(&self) -> Option<NaiveDate>;
}

impl MiqatDateExt for NaiveDate {
    fn to_hijri(&self) -> Result<CalendarDate, MiqatError> {
        gregorian_to_hijri(*self)
    }

    fn to_hijri_adjusted(&self, adjustment: i64) -> Result<CalendarDate, MiqatError> {
        to_hijri(*self, adjustment)
    }

    fn prayer_times(&self, coords: GeoCoordinate) -> PrayerTimes {
        calculate_prayer_times(*self, coords, &PrayerParams::default())
    }

    fn prayer_times_with(&self, coords: GeoCoordinate, params: &PrayerParams) -> PrayerTimes {
        calculate_prayer_times(*self, coords, params)
    }

    fn next_hijri_month_start(&self) -> Option<NaiveDate> {
        find_ahead(*self, 31, |h| h.day == 1)
    }

    fn next_ramadhan(&self) -> Option<NaiveDate> {
        find_ahead(*self, 400, |h| h.month == MONTH_RAMADHAN && h.day == 1)
    }
}

/// First date after `start` (exclusive) whose Hijri date matches.
/// Stops at the first date that cannot be converted.
fn find_ahead(start: NaiveDate, max_days: usize, matches: impl Fn(&CalendarDate) -> bool) -> Option<NaiveDate> {
    let mut d = start;
    for _ in 0..max_days {
        d = d.succ_opt()?;
        match gregorian_to_hijri(d) {
            Ok(h) if matches(&h) => return Some(d),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
    None
}
