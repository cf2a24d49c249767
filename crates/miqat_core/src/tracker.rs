//! Countdown tracker for periodic display refresh.

use chrono::{NaiveDate, NaiveDateTime};
use miqat_astronomy::{carried_over, resolve_next};
use miqat_types::{GeoCoordinate, MiqatError, NextPrayer, PrayerTimes};
use tracing::debug;

use crate::source::PrayerSource;

/// Memoizes prayer times per civil date so that a once-per-second tick only
/// compares timestamps. Yesterday is kept alongside today because its Isha can
/// fall past midnight. Solar geometry is recomputed when the date changes or
/// when tonight's rollover needs tomorrow's Fajr, and only once per date.
#[derive(Debug)]
pub struct PrayerTracker<S: PrayerSource> {
    source: S,
    coords: GeoCoordinate,
    days: Vec<PrayerTimes>,
}

impl<S: PrayerSource> PrayerTracker<S> {
    pub fn new(source: S, coords: GeoCoordinate) -> Self {
        Self { source, coords, days: Vec::new() }
    }

    pub fn coords(&self) -> GeoCoordinate {
        self.coords
    }

    /// Moves the observer and drops memoized days.
    pub fn set_coords(&mut self, coords: GeoCoordinate) {
        self.coords = coords;
        self.days.clear();
    }

    /// Number of civil dates currently memoized.
    pub fn cached_days(&self) -> usize {
        self.days.len()
    }

    /// Resolves the next prayer at `now`.
    ///
    /// # Errors
    /// Propagates source errors (never for the local engine).
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<NextPrayer, MiqatError> {
        let yesterday = now.date().pred_opt();
        let oldest = yesterday.unwrap_or(now.date());
        self.days.retain(|t| t.date >= oldest);

        let Self { source, coords, days } = self;
        if let Some(date) = yesterday {
            match memoized(source, *coords, days, date) {
                Ok(previous) => {
                    if let Some(next) = carried_over(&previous, now) {
                        return Ok(next);
                    }
                }
                Err(MiqatError::DateNotAvailable { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        let today = memoized(source, *coords, days, now.date())?;
        resolve_next(&today, now, |date| memoized(source, *coords, days, date))
    }
}

fn memoized<S: PrayerSource>(
    source: &S,
    coords: GeoCoordinate,
    days: &mut Vec<PrayerTimes>,
    date: NaiveDate,
) -> Result<PrayerTimes, MiqatError> {
    if let Some(times) = days.iter().find(|t| t.date == date) {
        return Ok(times.clone());
    }
    debug!(%date, source = source.name(), "computing prayer times");
    let times = source.prayer_times(coords, date)?;
    days.push(times.clone());
    Ok(times)
}
