//! The prayer-data capability and its local implementation.

use chrono::{NaiveDate, NaiveDateTime};
use miqat_astronomy::{calculate_prayer_times, carried_over, resolve_next};
use miqat_calendar::to_hijri;
use miqat_types::{CalendarDate, GeoCoordinate, MiqatError, NextPrayer, PrayerParams, PrayerTimes};

use crate::config::EngineConfig;

/// Something that can answer Hijri-date and prayer-time questions.
///
/// The local [`SolarEngine`] is the reference implementation. Remote sources
/// implement the same trait so callers can swap them without code changes;
/// their numbers are not expected to match the local engine exactly.
pub trait PrayerSource: std::fmt::Debug + Send + Sync {
    /// Hijri date for a Gregorian date.
    fn hijri_date(&self, date: NaiveDate) -> Result<CalendarDate, MiqatError>;

    /// The five prayer times of `date` at `coords`.
    fn prayer_times(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<PrayerTimes, MiqatError>;

    /// The first prayer strictly after `now`, with its countdown.
    ///
    /// Looks at the day before `now` first, since its Isha can fall past midnight.
    fn next_prayer(&self, coords: GeoCoordinate, now: NaiveDateTime) -> Result<NextPrayer, MiqatError> {
        if let Some(previous) = previous_day(self, coords, now)? {
            if let Some(next) = carried_over(&previous, now) {
                return Ok(next);
            }
        }
        let today = self.prayer_times(coords, now.date())?;
        resolve_next(&today, now, |date| self.prayer_times(coords, date))
    }

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Prayer times of the day before `now`'s date.
///
/// A source with no data for that day has nothing carried over, so
/// `DateNotAvailable` becomes `None`.
pub(crate) fn previous_day<S: PrayerSource + ?Sized>(
    source: &S,
    coords: GeoCoordinate,
    now: NaiveDateTime,
) -> Result<Option<PrayerTimes>, MiqatError> {
    let Some(date) = now.date().pred_opt() else {
        return Ok(None);
    };
    match source.prayer_times(coords, date) {
        Ok(times) => Ok(Some(times)),
        Err(MiqatError::DateNotAvailable { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Local trigonometric engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolarEngine {
    params: PrayerParams,
    adjustment: i64,
}

impl SolarEngine {
    pub fn new(params: PrayerParams, adjustment: i64) -> Self {
        Self { params, adjustment }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.params, config.hijri_adjustment)
    }

    pub fn params(&self) -> &PrayerParams {
        &self.params
    }
}

impl PrayerSource for SolarEngine {
    fn hijri_date(&self, date: NaiveDate) -> Result<CalendarDate, MiqatError> {
        to_hijri(date, self.adjustment)
    }

    fn prayer_times(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<PrayerTimes, MiqatError> {
        Ok(calculate_prayer_times(date, coords, &self.params))
    }

    fn name(&self) -> &str {
        "SolarEngine"
    }
}

impl<S: PrayerSource + ?Sized> PrayerSource for Box<S> {
    fn hijri_date(&self, date: NaiveDate) -> Result<CalendarDate, MiqatError> {
        (**self).hijri_date(date)
    }

    fn prayer_times(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<PrayerTimes, MiqatError> {
        (**self).prayer_times(coords, date)
    }

    fn next_prayer(&self, coords: GeoCoordinate, now: NaiveDateTime) -> Result<NextPrayer, MiqatError> {
        (**self).next_prayer(coords, now)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
