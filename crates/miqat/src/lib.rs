//! # Miqat
//!
//! Approximate Hijri calendar conversion and the five daily prayer times
//! (Fajr, Dhuhr, Asr, Maghrib, Isha) computed from solar geometry, plus
//! next-prayer detection with a live countdown.
//!
//! This crate is a facade that re-exports functionality from the `miqat` ecosystem.
//!
//! ## Modules
//!
//! - `miqat-types`: Core types (GeoCoordinate, PrayerTimes, CalendarDate, etc.)
//! - `miqat-calendar`: Arithmetic Hijri conversion
//! - `miqat-astronomy`: Solar declination, hour angles, prayer times
//! - `remote`: Aladhan-compatible remote source (feature `remote`)
//!
//! ## Usage
//!
//! ```rust
//! use miqat::prelude::*;
//! use chrono::NaiveDate;
//!
//! let cairo = GeoCoordinate::new(30.0444, 31.2357).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//!
//! let hijri = gregorian_to_hijri(date).unwrap();
//! assert_eq!(hijri.to_string(), "16 Dhu al-Hijjah 1445 AH");
//!
//! let times = calculate_prayer_times(date, cairo, &PrayerParams::default());
//! let next = next_prayer(&times, date.and_hms_opt(13, 0, 0).unwrap());
//! assert_eq!(next.prayer, Prayer::Asr);
//! ```

pub use miqat_core::*;

#[cfg(feature = "remote")]
pub mod remote {
    pub use miqat_network::*;
}
