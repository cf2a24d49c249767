//! Fetched remote days, served through `PrayerSource`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use miqat_core::{CalendarDate, GeoCoordinate, MiqatError, PrayerSource, PrayerTimes};
use serde::{Deserialize, Serialize};

use crate::aladhan::RemoteDay;

/// Coordinate tolerance when matching a request against the fetched location.
const COORD_EPSILON: f64 = 1e-6;

/// Remote days for one location, keyed by civil date.
///
/// Answers only for the dates it holds; anything else is `DateNotAvailable`.
/// The rollover in [`PrayerSource::next_prayer`] therefore needs the following
/// day to be present as well. A missing preceding day just means no Isha is
/// carried past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    coords: GeoCoordinate,
    days: BTreeMap<NaiveDate, RemoteDay>,
}

impl Timetable {
    pub fn new(coords: GeoCoordinate) -> Self {
        Self { coords, days: BTreeMap::new() }
    }

    pub fn coords(&self) -> GeoCoordinate {
        self.coords
    }

    pub fn insert(&mut self, date: NaiveDate, day: RemoteDay) {
        self.days.insert(date, day);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&RemoteDay> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Dates held, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    fn day(&self, date: NaiveDate) -> Result<&RemoteDay, MiqatError> {
        self.days.get(&date).ok_or_else(|| MiqatError::not_available(date))
    }
}

impl PrayerSource for Timetable {
    fn hijri_date(&self, date: NaiveDate) -> Result<CalendarDate, MiqatError> {
        Ok(self.day(date)?.hijri.clone())
    }

    fn prayer_times(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<PrayerTimes, MiqatError> {
        if (coords.lat - self.coords.lat).abs() > COORD_EPSILON || (coords.lng - self.coords.lng).abs() > COORD_EPSILON {
            return Err(MiqatError::invalid_config(format!(
                "timetable holds {}, asked for {}",
                self.coords, coords
            )));
        }
        Ok(self.day(date)?.times.clone())
    }

    fn name(&self) -> &str {
        "Aladhan"
    }
}
