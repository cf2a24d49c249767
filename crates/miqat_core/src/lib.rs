//! Core engine of miqat: Hijri dates, prayer times and next-prayer resolution.
//!
//! Ties the calendar and astronomy crates together behind the [`PrayerSource`]
//! trait, with the local [`SolarEngine`] as its reference implementation.
//! [`Miqat`] binds a source to a location and an injected [`Clock`];
//! [`PrayerTracker`] and [`UpcomingPrayers`] serve countdown displays and
//! reminder schedulers.

pub mod clock;
pub mod config;
pub mod extension;
pub mod source;
pub mod tracker;

pub use miqat_astronomy::{calculate_default, calculate_prayer_times, format_countdown, next_prayer, resolve_next};
pub use miqat_calendar::{gregorian_to_hijri, hijri_epoch, to_hijri};
pub use miqat_types::*;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use extension::MiqatDateExt;
pub use source::{PrayerSource, SolarEngine};
pub use tracker::PrayerTracker;

pub mod prelude {
    pub use crate::{gregorian_to_hijri, next_prayer, calculate_prayer_times};
    pub use crate::{CalendarDate, GeoCoordinate, NextPrayer, Prayer, PrayerParams, PrayerTimes, MiqatError};
    pub use crate::{Clock, EngineConfig, Miqat, MiqatDateExt, PrayerSource, SolarEngine};
}

use chrono::{NaiveDate, NaiveDateTime};

/// Days without any later prayer after which `UpcomingPrayers` stops.
const MAX_EMPTY_DAYS: usize = 3;

/// A prayer source bound to a location and a clock.
///
/// Every operation takes an optional instant; `None` means "now" according
/// to the injected clock.
#[derive(Debug)]
pub struct Miqat<S = SolarEngine, C = SystemClock> {
    source: S,
    clock: C,
    coords: GeoCoordinate,
}

impl Miqat {
    /// Local engine on the system clock.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_parts(SolarEngine::from_config(config), SystemClock, config.coords)
    }
}

impl<S: PrayerSource, C: Clock> Miqat<S, C> {
    pub fn with_parts(source: S, clock: C, coords: GeoCoordinate) -> Self {
        Self { source, clock, coords }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn coords(&self) -> GeoCoordinate {
        self.coords
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Hijri date of `date`, or of today.
    pub fn hijri_date(&self, date: Option<NaiveDate>) -> Result<CalendarDate, MiqatError> {
        self.source.hijri_date(date.unwrap_or_else(|| self.now().date()))
    }

    /// Shorthand for `hijri_date(None)`.
    pub fn hijri_today(&self) -> Result<CalendarDate, MiqatError> {
        self.hijri_date(None)
    }

    /// Prayer times of `date`, or of today.
    pub fn prayer_times(&self, date: Option<NaiveDate>) -> Result<PrayerTimes, MiqatError> {
        self.source.prayer_times(self.coords, date.unwrap_or_else(|| self.now().date()))
    }

    /// Next prayer after `now`, or after the clock's current instant.
    pub fn next_prayer(&self, now: Option<NaiveDateTime>) -> Result<NextPrayer, MiqatError> {
        self.source.next_prayer(self.coords, now.unwrap_or_else(|| self.now()))
    }

    /// Shorthand for `next_prayer(None)`.
    pub fn next_prayer_now(&self) -> Result<NextPrayer, MiqatError> {
        self.next_prayer(None)
    }

    /// Prayers strictly after `from` (default: now), across days.
    pub fn upcoming(&self, from: Option<NaiveDateTime>) -> UpcomingPrayers<'_, S> {
        upcoming_prayers(&self.source, self.coords, from.unwrap_or_else(|| self.now()))
    }
}

/// Iterator over successive prayers after an instant, for reminder scheduling.
pub struct UpcomingPrayers<'a, S: PrayerSource + ?Sized> {
    source: &'a S,
    coords: GeoCoordinate,
    day: NaiveDate,
    /// Date of the start instant; earlier days may be missing from the source.
    start: NaiveDate,
    after: NaiveDateTime,
    current: Option<PrayerTimes>,
    done: bool,
}

impl<S: PrayerSource + ?Sized> Iterator for UpcomingPrayers<'_, S> {
    type Item = Result<(Prayer, NaiveDateTime), MiqatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // One extra pass for the day before the start, which is usually empty.
        for _ in 0..=MAX_EMPTY_DAYS {
            let times = match self.current.take() {
                Some(times) => times,
                None => match self.source.prayer_times(self.coords, self.day) {
                    Ok(times) => times,
                    Err(MiqatError::DateNotAvailable { .. }) if self.day < self.start => {
                        self.day = self.start;
                        continue;
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
            };

            if let Some((prayer, time)) = times.first_after(self.after) {
                self.after = time;
                self.current = Some(times);
                return Some(Ok((prayer, time)));
            }

            self.day = self.day.succ_opt()?;
        }
        // Saturated geometry on consecutive days; nothing meaningful left.
        self.done = true;
        None
    }
}

/// Lazily yields prayers strictly after `from`, rolling over to later days.
///
/// Starts from the day before `from` so that an Isha past midnight is included.
pub fn upcoming_prayers<S: PrayerSource + ?Sized>(source: &S, coords: GeoCoordinate, from: NaiveDateTime) -> UpcomingPrayers<'_, S> {
    UpcomingPrayers {
        source,
        coords,
        day: from.date().pred_opt().unwrap_or(from.date()),
        start: from.date(),
        after: from,
        current: None,
        done: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn cairo() -> GeoCoordinate {
        GeoCoordinate::new(30.0444, 31.2357).unwrap()
    }

    fn solstice_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn fixed(now: NaiveDateTime) -> Miqat<SolarEngine, FixedClock> {
        Miqat::with_parts(SolarEngine::default(), FixedClock(now), cairo())
    }

    #[test]
    fn test_defaults_to_injected_clock() {
        let miqat = fixed(solstice_at(13, 0));
        assert_eq!(miqat.next_prayer_now().unwrap().prayer, Prayer::Asr);
        assert_eq!(miqat.hijri_today().unwrap().to_string(), "16 Dhu al-Hijjah 1445 AH");
        assert_eq!(miqat.prayer_times(None).unwrap().date, solstice_at(0, 0).date());
    }

    #[test]
    fn test_explicit_instant_overrides_clock() {
        let miqat = fixed(solstice_at(13, 0));
        let next = miqat.next_prayer(Some(solstice_at(5, 0))).unwrap();
        assert_eq!(next.prayer, Prayer::Dhuhr);

        let other = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(miqat.hijri_date(Some(other)).unwrap().month, 9);
    }

    #[test]
    fn test_new_from_config() {
        let config = EngineConfig::new().coords(cairo()).hijri_adjustment(1);
        let miqat = Miqat::new(&config);
        assert_eq!(miqat.coords(), cairo());
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(miqat.hijri_date(Some(date)).unwrap().day, 4);
    }

    #[test]
    fn test_upcoming_prayers_cross_midnight() {
        let miqat = fixed(solstice_at(19, 0));
        let events: Vec<Prayer> = miqat
            .upcoming(None)
            .take(7)
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(
            events,
            vec![
                Prayer::Maghrib,
                Prayer::Isha,
                Prayer::Fajr,
                Prayer::Dhuhr,
                Prayer::Asr,
                Prayer::Maghrib,
                Prayer::Isha
            ]
        );
    }

    #[test]
    fn test_upcoming_prayers_strictly_increasing() {
        let source = SolarEngine::default();
        let times: Vec<NaiveDateTime> = upcoming_prayers(&source, cairo(), solstice_at(0, 0))
            .take(20)
            .map(|r| r.unwrap().1)
            .collect();
        assert_eq!(times.len(), 20);
        for w in times.windows(2) {
            assert!(w[0] < w[1]);
        }
        assert!(times[0] - solstice_at(0, 0) < Duration::hours(4));
    }

    #[test]
    fn test_upcoming_includes_isha_past_midnight() {
        #[derive(Debug)]
        struct LateIsha;

        impl PrayerSource for LateIsha {
            fn hijri_date(&self, date: NaiveDate) -> Result<CalendarDate, MiqatError> {
                gregorian_to_hijri(date)
            }

            fn prayer_times(&self, coords: GeoCoordinate, date: NaiveDate) -> Result<PrayerTimes, MiqatError> {
                if date < solstice_at(0, 0).date() {
                    return Err(MiqatError::not_available(date));
                }
                let mut times = calculate_default(date, coords);
                times.isha = date.succ_opt().unwrap().and_hms_opt(0, 20, 0).unwrap();
                Ok(times)
            }

            fn name(&self) -> &str {
                "LateIsha"
            }
        }

        let after_midnight = solstice_at(0, 10) + Duration::days(1);
        let first: Vec<(Prayer, NaiveDateTime)> = upcoming_prayers(&LateIsha, cairo(), after_midnight)
            .take(2)
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(first[0], (Prayer::Isha, solstice_at(0, 20) + Duration::days(1)));
        assert_eq!(first[1].0, Prayer::Fajr);

        // The source has nothing before the solstice; that day is skipped, not an error.
        let events: Vec<Prayer> = upcoming_prayers(&LateIsha, cairo(), solstice_at(0, 0))
            .take(5)
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(events, Prayer::ALL.to_vec());
    }

    #[test]
    fn test_upcoming_with_dyn_source() {
        let source: Box<dyn PrayerSource> = Box::new(SolarEngine::default());
        let first = upcoming_prayers(source.as_ref(), cairo(), solstice_at(13, 0)).next();
        assert!(matches!(first, Some(Ok((Prayer::Asr, _)))));
    }
}
