//! Core value types shared by the miqat crates.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

pub mod error;

pub use error::MiqatError;

/// Hijri month names, Muharram first.
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadhan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Returns Hijri month name (1-based).
pub fn hijri_month_name(month: usize) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| HIJRI_MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("Unknown")
}

/// Geographic location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    /// The Kaaba, Mecca.
    pub const MECCA: Self = Self { lat: 21.3891, lng: 39.8579 };

    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidCoordinate` if either component is not finite or out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, MiqatError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(MiqatError::InvalidCoordinate { lat, lng })
        }
    }

    /// Creates a coordinate without validation.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude clamped to [-90, 90], longitude wrapped into [-180, 180).
    /// Non-finite components become 0 (infinite latitude clamps to its pole).
    pub fn normalized(&self) -> Self {
        let lat = if self.lat.is_nan() { 0.0 } else { self.lat.clamp(-90.0, 90.0) };
        let lng = if self.lng.is_finite() && (-180.0..180.0).contains(&self.lng) {
            self.lng
        } else if self.lng.is_finite() {
            (self.lng + 180.0).rem_euclid(360.0) - 180.0
        } else {
            0.0
        };
        Self { lat, lng }
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::MECCA
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

/// The five daily prayers, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in the order they occur during a day.
    pub const ALL: [Prayer; 5] = [Prayer::Fajr, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib, Prayer::Isha];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Twilight angles (sun altitude in degrees, negative = below horizon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerParams {
    /// Sun altitude at Fajr. Default: -18°.
    pub fajr_angle: f64,
    /// Sun altitude at Isha. Default: -17°.
    pub isha_angle: f64,
}

impl Default for PrayerParams {
    fn default() -> Self {
        Self { fajr_angle: -18.0, isha_angle: -17.0 }
    }
}

impl PrayerParams {
    pub fn new(fajr_angle: f64, isha_angle: f64) -> Self {
        Self { fajr_angle, isha_angle }
    }

    /// Muslim World League angles (-18° / -17°), same as the default.
    pub fn mwl() -> Self {
        Self::default()
    }

    pub fn fajr_angle(mut self, angle: f64) -> Self {
        self.fajr_angle = angle;
        self
    }

    pub fn isha_angle(mut self, angle: f64) -> Self {
        self.isha_angle = angle;
        self
    }

    /// Checks that both angles are finite and within [-30, 0).
    pub fn validate(&self) -> Result<(), MiqatError> {
        for (name, angle) in [("fajr_angle", self.fajr_angle), ("isha_angle", self.isha_angle)] {
            if !angle.is_finite() || !(-30.0..0.0).contains(&angle) {
                return Err(MiqatError::invalid_config(format!(
                    "{} {} outside [-30, 0)",
                    name, angle
                )));
            }
        }
        Ok(())
    }
}

/// An approximate Hijri calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Day of month, 1..=30.
    pub day: usize,
    /// Month, 1..=12.
    pub month: usize,
    /// Year AH, at least 1.
    pub year: usize,
    pub month_name: String,
}

impl CalendarDate {
    /// Builds a date, clamping day into [1, 30], month into [1, 12] and year to at least 1.
    pub fn new(day: usize, month: usize, year: usize) -> Self {
        let month = month.clamp(1, 12);
        Self {
            day: day.clamp(1, 30),
            month,
            year: year.max(1),
            month_name: hijri_month_name(month).to_string(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name, self.year)
    }
}

/// Prayer times for one civil date at one location, in local civil time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub date: NaiveDate,
    pub coords: GeoCoordinate,
    pub params: PrayerParams,
    pub fajr: NaiveDateTime,
    pub dhuhr: NaiveDateTime,
    pub asr: NaiveDateTime,
    pub maghrib: NaiveDateTime,
    pub isha: NaiveDateTime,
    /// Prayers whose sun altitude is never reached on this date (polar day or night).
    /// Their times come from a saturated hour angle and have no canonical meaning.
    pub clamped: SmallVec<[Prayer; 5]>,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> NaiveDateTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Iterates `(prayer, time)` in chronological key order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, NaiveDateTime)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// True if any prayer was computed from a saturated hour angle.
    pub fn is_degenerate(&self) -> bool {
        !self.clamped.is_empty()
    }

    /// First prayer strictly after `now`. A prayer at exactly `now` has passed.
    pub fn first_after(&self, now: NaiveDateTime) -> Option<(Prayer, NaiveDateTime)> {
        self.iter().find(|(_, time)| *time > now)
    }
}

/// The upcoming prayer relative to some instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub time: NaiveDateTime,
    /// Remaining time as `HH:MM:SS`.
    pub countdown: String,
}

impl NextPrayer {
    pub fn name(&self) -> &'static str {
        self.prayer.name()
    }
}

impl fmt::Display for NextPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prayer, self.countdown)
    }
}
